use agent_context_core::report::ExitReport;

/// Text for stdout and stderr once the terminal has been restored
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

pub fn render(report: &ExitReport) -> Rendered {
    let mut out = Rendered::default();

    if let Some(message) = &report.message {
        if report.code == 0 {
            out.stdout.push(message.clone());
        } else {
            out.stderr.push(message.clone());
        }
    }

    out.stdout.extend(report.summary_lines());

    // Alone on its own line so it can be copied straight into an agent's config
    if let Some(target) = report.copyable_target() {
        out.stdout.push(String::new());
        out.stdout.push(target.display().to_string());
    }
    out
}

pub fn print(report: &ExitReport) {
    let rendered = render(report);
    for line in &rendered.stderr {
        eprintln!("{line}");
    }
    for line in &rendered.stdout {
        println!("{line}");
    }
}

pub fn print_error(error: &anyhow::Error) {
    eprintln!("Error: {error:#}");
}
