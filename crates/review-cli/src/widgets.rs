//! Terminal stand-ins for the chart widget and the reset confirmation.

use review_core::{ChartWidget, SCALE_MAX};
use std::io::{self, BufRead, Write};

const BAR_WIDTH: usize = 20;

/// Prints the radar values as horizontal bars.
#[derive(Debug)]
pub struct TextChart {
    labels: Vec<String>,
    series: String,
    visible: bool,
}

impl TextChart {
    /// A chart that prints only when `visible`.
    pub fn new(visible: bool) -> Self {
        Self {
            labels: Vec::new(),
            series: String::new(),
            visible,
        }
    }

    fn draw(&self, values: &[f64]) {
        if !self.visible {
            return;
        }
        println!("── {} ──", self.series);
        let width = self.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        for (label, value) in self.labels.iter().zip(values) {
            let filled = ((value / SCALE_MAX) * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            println!(
                "{label:<width$}  {}{}  {value:.0}",
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled),
            );
        }
    }
}

impl ChartWidget for TextChart {
    fn render(&mut self, labels: &[String], values: &[f64], series_label: &str) {
        self.labels = labels.to_vec();
        self.series = series_label.to_string();
        self.draw(values);
    }

    fn update(&mut self, values: &[f64], series_label: Option<&str>) {
        if let Some(series) = series_label {
            self.series = series.to_string();
        }
        self.draw(values);
    }
}

/// Asks on stdin, accepting `y` or `yes`.
pub fn ask_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_chart_keeps_series_label() {
        let mut chart = TextChart::new(false);
        chart.render(&["Impact".to_string()], &[3.0], "Ada");
        chart.update(&[4.0], None);
        assert_eq!(chart.series, "Ada");

        chart.update(&[4.0], Some("Grace"));
        assert_eq!(chart.series, "Grace");
        assert_eq!(chart.labels, ["Impact".to_string()]);
    }
}
