//! Terminal summaries.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{ExperimentOutput, FitResult};
use crate::task::{TaskRecord, TaskStatus};

/// Format the full summary for one fit run: fitted curves, derived
/// quantities, and the figure inventory handed to the renderer.
pub fn format_run_summary(output: &ExperimentOutput) -> String {
    let mut out = String::new();

    out.push_str("=== labfit - measurement fit ===\n");
    out.push_str(&format!("Experiment: {}\n", output.kind.display_name()));

    if output.fits.is_empty() {
        out.push_str("\nNo fitted curves (descriptive experiment).\n");
    } else {
        out.push_str("\nFitted curves:\n");
        for fit in &output.fits {
            out.push_str(&format_fit(fit));
        }
    }

    out.push_str("\nFigures:\n");
    for figure in &output.figures {
        out.push_str(&format!(
            "- {} [{} vs {}] ({} series)\n",
            figure.title,
            figure.y_label,
            figure.x_label,
            figure.series.len()
        ));
    }

    out
}

/// Format the outcome table for a batch of background tasks.
pub fn format_task_summary(records: &[TaskRecord]) -> String {
    let mut out = String::new();

    out.push_str("=== labfit - batch tasks ===\n");
    out.push_str(&format!(
        "{:<14} {:<24} {:<10} {}\n",
        "id", "experiment", "status", "note"
    ));
    for record in records {
        let note = match record.status {
            TaskStatus::Failed => record.error.as_deref().unwrap_or(""),
            _ => record.message.as_deref().unwrap_or(""),
        };
        out.push_str(
            format!(
                "{:<14} {:<24} {:<10} {}\n",
                truncate(&record.id, 14),
                record.experiment.display_name(),
                status_label(record.status),
                note
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn format_fit(fit: &FitResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "- {:<36} R²={:.6} coeffs={}\n",
        fit.label,
        fit.r_squared,
        fmt_vec(&fit.coefficients)
    ));
    for quantity in &fit.derived {
        let unit = if quantity.unit.is_empty() {
            String::new()
        } else {
            format!(" {}", quantity.unit)
        };
        out.push_str(&format!(
            "    {} {} = {:.6}{unit}\n",
            quantity.name, quantity.symbol, quantity.value
        ));
    }
    out
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::Completed => "completed",
        TaskStatus::Failed => "failed",
    }
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::domain::{DerivedQuantity, ExperimentKind};
    use crate::render::Figure;

    fn sample_output() -> ExperimentOutput {
        ExperimentOutput {
            kind: ExperimentKind::Mechanics,
            fits: vec![FitResult {
                label: "T²-M linear fit".to_string(),
                coefficients: vec![39.478418, 0.002],
                r_squared: 0.9991,
                derived: vec![DerivedQuantity::new("stiffness constant", "k", 1.0, "N/m")],
            }],
            figures: vec![Figure::sweep(
                "T² vs M",
                "M (kg)",
                "T² (s²)",
                &[0.05, 0.1],
                &[1.97, 3.95],
            )],
        }
    }

    #[test]
    fn run_summary_lists_fits_and_figures() {
        let text = format_run_summary(&sample_output());
        assert!(text.contains("Experiment: Spring oscillator"));
        assert!(text.contains("T²-M linear fit"));
        assert!(text.contains("R²=0.999100"));
        assert!(text.contains("stiffness constant k = 1.000000 N/m"));
        assert!(text.contains("T² vs M"));
        assert!(text.contains("(2 series)"));
    }

    #[test]
    fn run_summary_marks_descriptive_experiments() {
        let output = ExperimentOutput {
            kind: ExperimentKind::Thermal,
            fits: vec![],
            figures: vec![],
        };
        let text = format_run_summary(&output);
        assert!(text.contains("No fitted curves"));
    }

    #[test]
    fn task_summary_shows_error_text_for_failures() {
        let records = vec![
            TaskRecord {
                id: "0123456789abcdef".to_string(),
                experiment: ExperimentKind::Millikan,
                status: TaskStatus::Completed,
                submitted_at: Utc::now(),
                finished_at: Some(Utc::now()),
                output: None,
                message: Some("produced 1 figure(s)".to_string()),
                error: None,
            },
            TaskRecord {
                id: "fedcba9876543210".to_string(),
                experiment: ExperimentKind::Ultrasound,
                status: TaskStatus::Failed,
                submitted_at: Utc::now(),
                finished_at: Some(Utc::now()),
                output: None,
                message: Some("fit failed".to_string()),
                error: Some("paired series must be equally long".to_string()),
            },
        ];
        let text = format_task_summary(&records);
        assert!(text.contains("completed"));
        assert!(text.contains("produced 1 figure(s)"));
        assert!(text.contains("failed"));
        assert!(text.contains("paired series must be equally long"));
        // Long ids are truncated for the table.
        assert!(text.contains("0123456789abc."));
    }

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate("short", 14), "short");
    }
}
