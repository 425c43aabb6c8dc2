//! Optional chart windows
//!
//! Built only with the `plot` cargo feature (eframe + egui_plot). Without
//! the feature the same entry points exist but print a skip message, so
//! binaries can call them unconditionally and a chartless build never
//! fails a run.

use chrono::NaiveDate;

use crate::core::QuoteRow;

/// Minimum usable points before a chart is worth opening.
pub const MIN_PLOT_POINTS: usize = 10;

#[cfg(not(feature = "plot"))]
mod imp {
    use super::*;

    /// Skip message stand-in for the IV surface chart.
    pub fn iv_surface_chart(_rows: &[QuoteRow], _spot: f64, _symbol: &str) {
        println!("\nChart support not built in (enable the `plot` feature). Skipping visualization.");
    }

    /// Skip message stand-in for the Greeks chart.
    pub fn greeks_chart(_rows: &[QuoteRow], _spot: f64, _expiration: NaiveDate) {
        println!("\nChart support not built in (enable the `plot` feature). Skipping visualization.");
    }
}

#[cfg(feature = "plot")]
mod imp {
    use super::*;

    use eframe::egui;
    use egui_plot::{Legend, Line, Plot, PlotPoints, Points, VLine};

    use crate::analytics::{by_option_type, by_strike_band, sorted_dtes, with_valid_iv};
    use crate::core::OptionType;

    /// Scatter of call IV (%) against strike, one series per expiration,
    /// strikes limited to 80-120% of spot.
    pub fn iv_surface_chart(rows: &[QuoteRow], spot: f64, symbol: &str) {
        let calls = by_strike_band(
            &with_valid_iv(&by_option_type(rows, OptionType::Call)),
            spot * 0.8,
            spot * 1.2,
        );

        if calls.len() < MIN_PLOT_POINTS {
            println!("Not enough data for surface plot");
            return;
        }

        let series: Vec<(i64, Vec<[f64; 2]>)> = sorted_dtes(&calls)
            .into_iter()
            .map(|dte| {
                let pts = calls
                    .iter()
                    .filter(|r| r.dte == dte)
                    .filter_map(|r| r.implied_volatility.map(|iv| [r.strike, iv * 100.0]))
                    .collect();
                (dte, pts)
            })
            .collect();

        let title = format!("{} Implied Volatility Surface", symbol);
        let app = IvSurfaceApp {
            series,
            spot,
            title: title.clone(),
        };

        if let Err(e) = run_window(&title, Box::new(app)) {
            println!("Could not open chart window: {}", e);
        }
    }

    /// Delta/gamma/theta/vega against strike for calls near spot, with a
    /// dashed vertical marker at the underlying price.
    pub fn greeks_chart(rows: &[QuoteRow], spot: f64, expiration: NaiveDate) {
        let mut calls = by_strike_band(
            &by_option_type(rows, OptionType::Call),
            spot * 0.85,
            spot * 1.15,
        );
        calls.sort_by(|a, b| a.strike.partial_cmp(&b.strike).unwrap());

        if calls.is_empty() {
            println!("Not enough data for visualization");
            return;
        }

        let series: Vec<(&'static str, Vec<[f64; 2]>)> = [
            ("Delta", pick(&calls, |r| r.delta)),
            ("Gamma", pick(&calls, |r| r.gamma)),
            ("Theta", pick(&calls, |r| r.theta)),
            ("Vega", pick(&calls, |r| r.vega)),
        ]
        .into_iter()
        .filter(|(_, pts)| !pts.is_empty())
        .collect();

        if series.is_empty() {
            println!("No Greeks available to plot");
            return;
        }

        let title = format!("Greeks Analysis - Expiry: {}", expiration);
        let app = GreeksApp {
            series,
            spot,
            title: title.clone(),
        };

        if let Err(e) = run_window(&title, Box::new(app)) {
            println!("Could not open chart window: {}", e);
        }
    }

    fn pick(calls: &[QuoteRow], greek: fn(&QuoteRow) -> Option<f64>) -> Vec<[f64; 2]> {
        calls
            .iter()
            .filter_map(|r| greek(r).map(|g| [r.strike, g]))
            .collect()
    }

    fn run_window(title: &str, app: Box<dyn eframe::App>) -> eframe::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 700.0])
                .with_title(title),
            ..Default::default()
        };
        eframe::run_native(title, options, Box::new(move |_cc| app))
    }

    struct IvSurfaceApp {
        series: Vec<(i64, Vec<[f64; 2]>)>,
        spot: f64,
        title: String,
    }

    impl eframe::App for IvSurfaceApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(&self.title);

                Plot::new("iv_surface")
                    .x_axis_label("Strike")
                    .y_axis_label("IV (%)")
                    .legend(Legend::default())
                    .show(ui, |plot_ui| {
                        for (dte, pts) in &self.series {
                            plot_ui.points(
                                Points::new(PlotPoints::new(pts.clone()))
                                    .name(format!("{} DTE", dte))
                                    .radius(2.5),
                            );
                        }
                        plot_ui.vline(
                            VLine::new(self.spot)
                                .name("Spot")
                                .color(egui::Color32::YELLOW)
                                .style(egui_plot::LineStyle::Dashed { length: 5.0 }),
                        );
                    });
            });
        }
    }

    struct GreeksApp {
        series: Vec<(&'static str, Vec<[f64; 2]>)>,
        spot: f64,
        title: String,
    }

    impl eframe::App for GreeksApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(&self.title);

                let spot = self.spot;
                ui.columns(2, |cols| {
                    for (i, (name, pts)) in self.series.iter().enumerate() {
                        let col = &mut cols[i % 2];
                        Plot::new(*name)
                            .height(280.0)
                            .x_axis_label("Strike")
                            .y_axis_label(*name)
                            .legend(Legend::default())
                            .show(col, |plot_ui| {
                                plot_ui.line(
                                    Line::new(PlotPoints::new(pts.clone()))
                                        .name(*name)
                                        .width(2.0),
                                );
                                plot_ui.vline(
                                    VLine::new(spot)
                                        .name("Spot")
                                        .color(egui::Color32::YELLOW)
                                        .style(egui_plot::LineStyle::Dashed { length: 5.0 }),
                                );
                            });
                    }
                });
            });
        }
    }
}

pub use imp::{greeks_chart, iv_surface_chart};
