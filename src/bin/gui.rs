#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use breakeven_toolbox::{
    config,
    cvp::{
        self, calculator, CvpAnalysis, CvpError, CvpInput, ScheduleRow, SensitivityAdjustments,
        ADJUSTMENT_LIMIT_PCT,
    },
    display, i18n,
};
use eframe::{egui, App, Frame};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points, VLine};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = icon_data.clone() {
        viewport = viewport.with_icon(icon);
    }
    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Break-Even Analysis Toolbox",
        native,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["BE_Cal.png", "icon.png", "assets/icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

fn legend_toggle(ui: &mut egui::Ui, title: &str, body: &str, state: &mut bool) {
    ui.horizontal(|ui| {
        ui.checkbox(state, title);
    });
    if *state {
        ui.add(egui::Label::new(egui::RichText::new(body).small()).wrap(true));
    }
}

/// 손익표를 CSV 텍스트로 직렬화한다. 내보내기 전용이며 표시 포맷 옵션은 쓰지 않는다.
fn schedule_to_csv(schedule: &[ScheduleRow]) -> String {
    let mut out = String::from(
        "quantity,total_variable_cost,total_cost,sales_revenue,profit_before_tax,net_profit\n",
    );
    for row in schedule {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            row.quantity,
            row.total_variable_cost,
            row.total_cost,
            row.sales_revenue,
            row.profit_before_tax,
            row.net_profit
        ));
    }
    out
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_pack_dir_input: String,
    tab: Tab,
    window_alpha: f32,
    show_formula_modal: bool,
    show_settings_modal: bool,
    show_help_modal: bool,
    // 해설 토글
    show_legend_basic: bool,
    show_legend_dashboard: bool,
    // 공통 입력
    units: f64,
    fixed_cost: f64,
    variable_cost: f64,
    selling_price: f64,
    // 대시보드 입력
    tax_rate: f64,
    adj_price: f64,
    adj_variable_cost: f64,
    adj_fixed_cost: f64,
    adj_tax_rate: f64,
    target_profit: f64,
    csv_status: Option<String>,
    // 설정
    ui_scale: f32,
    always_on_top: bool,
    theme: ThemeChoice,
    custom_font_path: String,
    font_load_error: Option<String>,
    apply_initial_view_size: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Basic,
    Dashboard,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ThemeChoice {
    System,
    Light,
    Dark,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let lang_input = config.language.clone();
        let lang_pack_dir_input = config.language_pack_dir.clone().unwrap_or_default();
        let defaults = config.defaults.clone();
        Self {
            config,
            tr,
            lang_input,
            lang_pack_dir_input,
            tab: Tab::Basic,
            window_alpha: 1.0,
            show_formula_modal: false,
            show_settings_modal: false,
            show_help_modal: false,
            show_legend_basic: false,
            show_legend_dashboard: false,
            units: defaults.units,
            fixed_cost: defaults.fixed_cost,
            variable_cost: defaults.variable_cost_per_unit,
            selling_price: defaults.selling_price_per_unit,
            tax_rate: defaults.tax_rate_pct,
            adj_price: 0.0,
            adj_variable_cost: 0.0,
            adj_fixed_cost: 0.0,
            adj_tax_rate: 0.0,
            target_profit: 0.0,
            csv_status: None,
            ui_scale: 1.0,
            always_on_top: false,
            theme: ThemeChoice::System,
            custom_font_path: String::new(),
            font_load_error: None,
            apply_initial_view_size: true,
        }
    }

    fn base_input(&self, with_tax: bool) -> CvpInput {
        CvpInput {
            units: self.units,
            fixed_cost: self.fixed_cost,
            variable_cost_per_unit: self.variable_cost,
            selling_price_per_unit: self.selling_price,
            tax_rate_pct: if with_tax { self.tax_rate } else { 0.0 },
        }
    }

    fn adjustments(&self) -> SensitivityAdjustments {
        SensitivityAdjustments {
            price_pct: self.adj_price,
            variable_cost_pct: self.adj_variable_cost,
            fixed_cost_pct: self.adj_fixed_cost,
            tax_rate_pct: self.adj_tax_rate,
        }
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        for (tab, label) in [
            (Tab::Basic, txt("gui.nav.basic", "Break-Even Calculator")),
            (Tab::Dashboard, txt("gui.nav.dashboard", "Dashboard")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().widgets.inactive.bg_fill
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
        }
    }

    /// 입력 폼 공통 4개 필드. 값이 바뀌는 즉시 같은 프레임에서 재계산된다.
    fn form_base_fields(&mut self, ui: &mut egui::Ui, txt: &dyn Fn(&str, &str) -> String) {
        label_with_tip(
            ui,
            &txt("gui.form.units", "Target quantity"),
            &txt("gui.form.units_tip", "Production/sales quantity to evaluate"),
        );
        ui.add(egui::DragValue::new(&mut self.units).speed(10.0));
        ui.end_row();

        label_with_tip(
            ui,
            &txt("gui.form.fixed_cost", "Total fixed cost"),
            &txt(
                "gui.form.fixed_cost_tip",
                "Costs that do not vary with volume (rent, salaries...)",
            ),
        );
        ui.add(egui::DragValue::new(&mut self.fixed_cost).speed(100.0));
        ui.end_row();

        label_with_tip(
            ui,
            &txt("gui.form.variable_cost", "Variable cost per unit"),
            &txt(
                "gui.form.variable_cost_tip",
                "Cost incurred for each unit produced",
            ),
        );
        ui.add(egui::DragValue::new(&mut self.variable_cost).speed(1.0));
        ui.end_row();

        label_with_tip(
            ui,
            &txt("gui.form.selling_price", "Selling price per unit"),
            &txt("gui.form.selling_price_tip", "Revenue per unit sold"),
        );
        ui.add(egui::DragValue::new(&mut self.selling_price).speed(1.0));
        ui.end_row();
    }

    fn ui_basic(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.basic.heading", "Break-Even Calculator"),
            &txt(
                "gui.basic.tip",
                "Computes cost, revenue, profit and the break-even point.",
            ),
        );
        legend_toggle(
            ui,
            &txt("gui.legend.title", "What am I looking at?"),
            &txt(
                "gui.basic.legend",
                "Break-even units = fixed cost / (price - variable cost). \
                 Results update as you type; rounding happens only on screen.",
            ),
            &mut self.show_legend_basic,
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("basic_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    self.form_base_fields(ui, &txt);
                });
        });
        ui.add_space(8.0);

        let input = self.base_input(false);
        match cvp::analyze(&input, &SensitivityAdjustments::default()) {
            Ok(analysis) => {
                self.config.defaults.remember(&input);
                self.summary_cards(ui, &txt, &analysis, false);
                ui.add_space(8.0);
                self.schedule_table(ui, &txt, &analysis.schedule, false);
            }
            Err(e) => error_label(ui, &txt, &e),
        }
    }

    fn ui_dashboard(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.dash.heading", "Dashboard (tax + sensitivity)"),
            &txt(
                "gui.dash.tip",
                "Extended view: tax rate, what-if sliders and the cost-volume chart.",
            ),
        );
        legend_toggle(
            ui,
            &txt("gui.legend.title", "What am I looking at?"),
            &txt(
                "gui.dash.legend",
                "Each slider perturbs one base parameter by up to ±50% before the \
                 computation runs. Adjustments apply once per recomputation and \
                 never accumulate.",
            ),
            &mut self.show_legend_dashboard,
        );
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("dash_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    self.form_base_fields(ui, &txt);

                    label_with_tip(
                        ui,
                        &txt("gui.form.tax_rate", "Tax rate [%]"),
                        &txt("gui.form.tax_rate_tip", "Applied to pre-tax profit (0-100)"),
                    );
                    ui.add(
                        egui::DragValue::new(&mut self.tax_rate)
                            .speed(1.0)
                            .clamp_range(0.0..=100.0),
                    );
                    ui.end_row();
                });
        });
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(txt("gui.dash.sliders", "Sensitivity (what-if) adjustments"));
            let range = -ADJUSTMENT_LIMIT_PCT..=ADJUSTMENT_LIMIT_PCT;
            for (value, key, default) in [
                (&mut self.adj_price, "gui.dash.adj_price", "Price"),
                (
                    &mut self.adj_variable_cost,
                    "gui.dash.adj_variable_cost",
                    "Variable cost",
                ),
                (&mut self.adj_fixed_cost, "gui.dash.adj_fixed_cost", "Fixed cost"),
                (&mut self.adj_tax_rate, "gui.dash.adj_tax_rate", "Tax rate"),
            ] {
                ui.add(
                    egui::Slider::new(value, range.clone())
                        .step_by(1.0)
                        .suffix(" %")
                        .text(txt(key, default)),
                );
            }
            if ui
                .button(txt("gui.dash.reset_sliders", "Reset adjustments"))
                .clicked()
            {
                self.adj_price = 0.0;
                self.adj_variable_cost = 0.0;
                self.adj_fixed_cost = 0.0;
                self.adj_tax_rate = 0.0;
            }
        });
        ui.add_space(8.0);

        let input = self.base_input(true);
        let adjustments = self.adjustments();
        match cvp::analyze(&input, &adjustments) {
            Ok(analysis) => {
                self.config.defaults.remember(&input);
                if !adjustments.is_neutral() {
                    let p = &analysis.input_used;
                    ui.label(fill_template(
                        &txt(
                            "gui.dash.adjusted_params",
                            "Scenario: price {price}, variable cost {var}, fixed cost {fixed}, tax {tax}%",
                        ),
                        &[
                            (
                                "price",
                                display::format_currency(
                                    p.selling_price_per_unit,
                                    &self.config.display,
                                ),
                            ),
                            (
                                "var",
                                display::format_currency(
                                    p.variable_cost_per_unit,
                                    &self.config.display,
                                ),
                            ),
                            (
                                "fixed",
                                display::format_currency(p.fixed_cost, &self.config.display),
                            ),
                            ("tax", format!("{:.1}", p.tax_rate_pct)),
                        ],
                    ));
                    ui.add_space(4.0);
                }
                self.summary_cards(ui, &txt, &analysis, true);
                ui.add_space(8.0);
                self.chart_ui(ui, &txt, &analysis);
                ui.add_space(8.0);
                self.target_profit_ui(ui, &txt, &analysis.input_used);
                ui.add_space(8.0);
                self.schedule_table(ui, &txt, &analysis.schedule, true);
            }
            Err(e) => error_label(ui, &txt, &e),
        }
    }

    /// 요약 카드: 주요 지표를 카드 그리드로 보여준다.
    fn summary_cards(
        &self,
        ui: &mut egui::Ui,
        txt: &dyn Fn(&str, &str) -> String,
        analysis: &CvpAnalysis,
        show_net: bool,
    ) {
        let opts = &self.config.display;
        let result = &analysis.result;
        let c = |v: f64| display::format_currency(v, opts);
        let mut cards: Vec<(String, String)> = vec![
            (txt("gui.card.total_cost", "Total cost"), c(result.total_cost)),
            (
                txt("gui.card.revenue", "Sales revenue"),
                c(result.sales_revenue),
            ),
            (
                txt("gui.card.profit", "Profit before tax"),
                c(result.profit_before_tax),
            ),
        ];
        if show_net {
            cards.push((txt("gui.card.net_profit", "Net profit"), c(result.net_profit)));
        }
        cards.push((
            txt("gui.card.break_even_units", "Break-even units"),
            fill_template(
                &txt("gui.card.break_even_units_value", "{exact} ({ceil} needed)"),
                &[
                    ("exact", format!("{:.2}", result.break_even_units)),
                    (
                        "ceil",
                        format!("{:.0}", display::units_needed(result.break_even_units)),
                    ),
                ],
            ),
        ));
        cards.push((
            txt("gui.card.break_even_revenue", "Break-even revenue"),
            c(result.break_even_revenue),
        ));
        cards.push((
            txt("gui.card.contribution_margin", "Contribution margin"),
            fill_template(
                &txt("gui.card.contribution_margin_value", "{amount} ({ratio})"),
                &[
                    ("amount", c(result.contribution_margin)),
                    (
                        "ratio",
                        display::format_percent(result.contribution_margin_ratio * 100.0, 1),
                    ),
                ],
            ),
        ));
        cards.push((
            txt("gui.card.margin_of_safety", "Margin of safety"),
            fill_template(
                &txt("gui.card.margin_of_safety_value", "{units} units ({ratio})"),
                &[
                    ("units", format!("{:.1}", result.margin_of_safety_units)),
                    (
                        "ratio",
                        display::format_percent(result.margin_of_safety_ratio * 100.0, 1),
                    ),
                ],
            ),
        ));

        ui.horizontal_wrapped(|ui| {
            for (title, value) in cards {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(title).small());
                        ui.label(egui::RichText::new(value).strong());
                    });
                });
            }
        });
        if result.profit_before_tax < 0.0 {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                txt(
                    "gui.card.loss_note",
                    "Target quantity is below break-even: this scenario runs at a loss.",
                ),
            );
        }
    }

    /// 수량별 손익표. 1~10행과 (수량 > 10이면) 목표 수량 행을 그대로 보여준다.
    fn schedule_table(
        &mut self,
        ui: &mut egui::Ui,
        txt: &dyn Fn(&str, &str) -> String,
        schedule: &[ScheduleRow],
        show_net: bool,
    ) {
        let opts = self.config.display.clone();
        ui.label(txt("gui.schedule.heading", "Quantity schedule"));
        egui::Grid::new("schedule_grid")
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.strong(txt("gui.schedule.qty", "Qty"));
                ui.strong(txt("gui.schedule.variable", "Variable cost"));
                ui.strong(txt("gui.schedule.total", "Total cost"));
                ui.strong(txt("gui.schedule.revenue", "Revenue"));
                ui.strong(txt("gui.schedule.profit", "Profit"));
                if show_net {
                    ui.strong(txt("gui.schedule.net", "Net profit"));
                }
                ui.end_row();
                for row in schedule {
                    ui.label(format!("{:.0}", row.quantity));
                    ui.label(display::format_currency(row.total_variable_cost, &opts));
                    ui.label(display::format_currency(row.total_cost, &opts));
                    ui.label(display::format_currency(row.sales_revenue, &opts));
                    ui.label(display::format_currency(row.profit_before_tax, &opts));
                    if show_net {
                        ui.label(display::format_currency(row.net_profit, &opts));
                    }
                    ui.end_row();
                }
            });
        ui.horizontal(|ui| {
            if ui
                .button(txt("gui.schedule.export_csv", "Export CSV..."))
                .clicked()
            {
                self.export_schedule_csv(schedule);
            }
            if let Some(status) = &self.csv_status {
                ui.label(status);
            }
        });
    }

    fn export_schedule_csv(&mut self, schedule: &[ScheduleRow]) {
        let picked = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("cvp_schedule.csv")
            .save_file();
        if let Some(path) = picked {
            let csv = schedule_to_csv(schedule);
            self.csv_status = match fs::write(&path, csv) {
                Ok(()) => Some(format!("Saved: {}", path.display())),
                Err(e) => Some(format!("Save failed: {e}")),
            };
        }
    }

    /// 비용-수량-이익 라인 차트. 손익분기점은 수직선+마커로 표시한다.
    fn chart_ui(
        &self,
        ui: &mut egui::Ui,
        txt: &dyn Fn(&str, &str) -> String,
        analysis: &CvpAnalysis,
    ) {
        let revenue: PlotPoints = analysis
            .chart
            .iter()
            .map(|p| [p.quantity, p.sales_revenue])
            .collect();
        let total_cost: PlotPoints = analysis
            .chart
            .iter()
            .map(|p| [p.quantity, p.total_cost])
            .collect();
        let fixed_cost: PlotPoints = analysis
            .chart
            .iter()
            .map(|p| [p.quantity, p.fixed_cost])
            .collect();
        let profit: PlotPoints = analysis
            .chart
            .iter()
            .map(|p| [p.quantity, p.profit_before_tax])
            .collect();
        let be = &analysis.result;

        Plot::new("cvp_chart")
            .legend(Legend::default())
            .height(300.0)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(revenue).name(txt("gui.chart.revenue", "Revenue")));
                plot_ui.line(Line::new(total_cost).name(txt("gui.chart.total_cost", "Total cost")));
                plot_ui.line(Line::new(fixed_cost).name(txt("gui.chart.fixed_cost", "Fixed cost")));
                plot_ui.line(Line::new(profit).name(txt("gui.chart.profit", "Profit")));
                plot_ui.vline(
                    VLine::new(be.break_even_units).name(txt("gui.chart.break_even", "Break-even")),
                );
                plot_ui.points(
                    Points::new(vec![[be.break_even_units, be.break_even_revenue]])
                        .shape(MarkerShape::Diamond)
                        .radius(5.0)
                        .name(txt("gui.chart.break_even", "Break-even")),
                );
            });
    }

    /// 목표이익 달성 수량 미니 패널. 조정된 단위 경제성으로 계산한다.
    fn target_profit_ui(
        &mut self,
        ui: &mut egui::Ui,
        txt: &dyn Fn(&str, &str) -> String,
        input_used: &CvpInput,
    ) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                label_with_tip(
                    ui,
                    &txt("gui.target.label", "Target pre-tax profit"),
                    &txt(
                        "gui.target.tip",
                        "Required quantity = (fixed cost + target) / contribution margin",
                    ),
                );
                ui.add(egui::DragValue::new(&mut self.target_profit).speed(100.0));
                match calculator::units_for_target_profit(input_used, self.target_profit) {
                    Ok(units) => {
                        ui.label(fill_template(
                            &txt("gui.target.result", "→ {exact} units ({ceil} needed)"),
                            &[
                                ("exact", format!("{units:.2}")),
                                ("ceil", format!("{:.0}", display::units_needed(units))),
                            ],
                        ));
                    }
                    Err(_) => {
                        ui.label(txt("gui.target.unavailable", "—"));
                    }
                }
            });
        });
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        match self.theme {
            ThemeChoice::System => {}
            ThemeChoice::Light => ctx.set_visuals(egui::Visuals::light()),
            ThemeChoice::Dark => ctx.set_visuals(egui::Visuals::dark()),
        }
    }

    fn ui_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings_modal {
            return;
        }
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let mut open = self.show_settings_modal;
        egui::Window::new(txt("gui.settings.title", "Settings"))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.heading(txt("gui.settings.display", "Display"));
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(txt("gui.settings.currency", "Currency symbol"));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.config.display.currency_symbol)
                            .desired_width(48.0),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label(txt("gui.settings.decimals", "Decimal places"));
                    let mut decimals = f64::from(self.config.display.decimal_places);
                    ui.add(
                        egui::DragValue::new(&mut decimals)
                            .speed(1.0)
                            .clamp_range(0.0..=4.0),
                    );
                    self.config.display.decimal_places = decimals as u8;
                });
                ui.checkbox(
                    &mut self.config.display.thousands_separator,
                    txt("gui.settings.thousands", "Thousands separator"),
                );
                ui.separator();
                ui.label(txt("gui.settings.ui_scale", "UI scale"));
                let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                if ui.add(scale_slider).changed() {
                    ctx.set_pixels_per_point(self.ui_scale);
                }
                ui.separator();
                ui.checkbox(
                    &mut self.always_on_top,
                    txt("gui.settings.always_on_top", "Always on top"),
                );
                ui.label(txt("gui.settings.alpha", "Window transparency"));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                ui.label(txt("gui.settings.theme", "Theme"));
                ui.horizontal(|ui| {
                    for (label, choice) in [
                        (txt("gui.settings.theme_system", "System"), ThemeChoice::System),
                        (txt("gui.settings.theme_light", "Light"), ThemeChoice::Light),
                        (txt("gui.settings.theme_dark", "Dark"), ThemeChoice::Dark),
                    ] {
                        ui.selectable_value(&mut self.theme, choice, label);
                    }
                });
                ui.separator();
                ui.label(txt("gui.settings.lang", "Language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.clone())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            txt("gui.settings.lang_auto", "System"),
                        );
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                ui.horizontal(|ui| {
                    ui.label(txt("gui.settings.lang_pack_dir", "Language pack dir"));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.lang_pack_dir_input)
                            .desired_width(180.0),
                    );
                });
                if ui
                    .button(txt("gui.settings.apply_lang", "Apply language"))
                    .clicked()
                {
                    self.config.language = self.lang_input.clone();
                    self.config.language_pack_dir = if self.lang_pack_dir_input.trim().is_empty() {
                        None
                    } else {
                        Some(self.lang_pack_dir_input.trim().to_string())
                    };
                    let resolved =
                        i18n::resolve_language("auto", Some(self.config.language.as_str()));
                    self.tr = i18n::Translator::new_with_pack(
                        &resolved,
                        self.config.language_pack_dir.as_deref(),
                    );
                }
                ui.separator();
                ui.label(txt("gui.settings.font", "Custom font (.ttf/.ttc)"));
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.custom_font_path).desired_width(220.0),
                    );
                    if ui
                        .button(txt("gui.settings.font_browse", "Browse..."))
                        .clicked()
                    {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Font", &["ttf", "ttc", "otf"])
                            .pick_file()
                        {
                            self.custom_font_path = path.display().to_string();
                        }
                    }
                    if ui.button(txt("gui.settings.font_load", "Load")).clicked() {
                        self.font_load_error = load_custom_font(ctx, &self.custom_font_path).err();
                    }
                });
                if let Some(err) = &self.font_load_error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                }
                ui.separator();
                if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                    if let Err(e) = self.config.save() {
                        eprintln!("설정 저장 실패: {e}");
                    }
                }
            });
        self.show_settings_modal = open;
    }

    fn ui_formula_modal(&mut self, ctx: &egui::Context) {
        if !self.show_formula_modal {
            return;
        }
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let mut open = self.show_formula_modal;
        egui::Window::new(txt("gui.formula.title", "Formula reference"))
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                for (key, default) in [
                    (
                        "gui.formula.total_cost",
                        "Total cost = fixed cost + variable cost x quantity",
                    ),
                    ("gui.formula.revenue", "Revenue = selling price x quantity"),
                    ("gui.formula.profit", "Profit = revenue - total cost"),
                    ("gui.formula.net", "Net profit = profit x (1 - tax rate / 100)"),
                    (
                        "gui.formula.break_even",
                        "Break-even units = fixed cost / (price - variable cost)",
                    ),
                    (
                        "gui.formula.margin_of_safety",
                        "Margin of safety = target quantity - break-even units",
                    ),
                ] {
                    ui.label(txt(key, default));
                }
            });
        self.show_formula_modal = open;
    }

    fn ui_help_modal(&mut self, ctx: &egui::Context) {
        if !self.show_help_modal {
            return;
        }
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let mut open = self.show_help_modal;
        egui::Window::new(txt("gui.about.title", "Help / About"))
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(txt(
                    "gui.about.body",
                    "Break-Even Analysis Toolbox: enter quantity, fixed cost, variable \
                     cost and price; results, the quantity schedule and the chart update \
                     as you type. The dashboard adds a tax rate and ±50% what-if sliders.",
                ));
                ui.add_space(4.0);
                ui.label(txt(
                    "gui.about.rejection",
                    "If the price does not exceed the variable cost the break-even point \
                     does not exist and no results are shown.",
                ));
            });
        self.show_help_modal = open;
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target =
                    egui::vec2((screen.x * 0.60).max(1000.0), (screen.y * 0.60).max(700.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        self.apply_theme(ctx);

        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt =
            move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Break-Even Analysis Toolbox"));
                ui.label(" | Desktop GUI");
                ui.separator();
                if ui
                    .button(txt("gui.formula.button", "Formula reference"))
                    .clicked()
                {
                    self.show_formula_modal = true;
                }
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        self.ui_settings_modal(ctx);
        self.ui_formula_modal(ctx);
        self.ui_help_modal(ctx);

        egui::SidePanel::left("nav_panel")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
                Tab::Basic => self.ui_basic(ui),
                Tab::Dashboard => self.ui_dashboard(ui),
            });
        });
    }
}

fn error_label(ui: &mut egui::Ui, txt: &dyn Fn(&str, &str) -> String, err: &CvpError) {
    let message = match err {
        CvpError::InvalidInput(_) => txt(
            "gui.error.invalid_input",
            "Invalid data: quantity and price must be positive, costs non-negative.",
        ),
        CvpError::BreakEvenUnattainable => txt(
            "gui.error.break_even_unattainable",
            "Cannot reach break-even at these prices: selling price does not exceed \
             the variable cost.",
        ),
    };
    ui.colored_label(ui.visuals().error_fg_color, message);
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 CJK 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래 번들 폰트
/// 2) 시스템 폰트(Windows 맑은 고딕, Linux Noto CJK)
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    // 1) 프로젝트 내 폰트
    let asset_candidates = [
        "assets/fonts/malgun.ttf",
        "assets/fonts/NotoSansKR-Regular.ttf",
    ];
    for cand in asset_candidates {
        let p = Path::new(cand);
        if p.exists() {
            let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }

    // 2) 시스템 폰트 탐색
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        let candidates = ["malgun.ttf", "malgunsl.ttf", "malgunbd.ttf", "gulim.ttc"];
        for cand in candidates {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }
    let linux_candidates = [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/noto/NotoSansKR-Regular.ttf",
    ];
    for cand in linux_candidates {
        let p = Path::new(cand);
        if p.exists() {
            let bytes = fs::read(p)
                .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }

    // 3) 실패: 기본 폰트 유지, 사용자 지정 안내
    Err("CJK font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_seeds_form_from_config_defaults() {
        let mut cfg = config::Config::default();
        cfg.defaults.units = 250.0;
        cfg.defaults.selling_price_per_unit = 12.5;
        let app = GuiApp::new(cfg);
        assert_eq!(app.units, 250.0);
        assert_eq!(app.selling_price, 12.5);
        assert_eq!(app.tab, Tab::Basic);
    }

    #[test]
    fn base_input_without_tax_zeroes_tax_rate() {
        let mut cfg = config::Config::default();
        cfg.defaults.tax_rate_pct = 30.0;
        let app = GuiApp::new(cfg);
        assert_eq!(app.base_input(false).tax_rate_pct, 0.0);
        assert_eq!(app.base_input(true).tax_rate_pct, 30.0);
    }

    #[test]
    fn schedule_csv_has_header_and_rows() {
        let input = CvpInput {
            units: 3.0,
            fixed_cost: 100.0,
            variable_cost_per_unit: 10.0,
            selling_price_per_unit: 60.0,
            tax_rate_pct: 0.0,
        };
        let schedule = cvp::quantity_schedule(&input).unwrap();
        let csv = schedule_to_csv(&schedule);
        let lines: Vec<&str> = csv.trim_end().lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("quantity,"));
        assert!(lines[1].starts_with("1,"));
    }
}
