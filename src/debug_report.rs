use scoresight_assistant::{ResponseDetails, TierTrace};

pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    #[derive(Debug, Clone, Copy)]
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print how one message went through the cascade.
pub fn print_run(details: &ResponseDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Message: \"{}\"", details.input), ansi::CYAN)));
    println!("   {} {}", palette.dim("normalized:"), details.normalized);

    println!("\n{}", palette.paint("━━━ Cascade ━━━", ansi::GRAY));
    for pass in &details.trace {
        println!("  {}", fmt_pass(pass, &palette));
    }

    println!("\n{}", palette.paint("━━━ Reply ━━━", ansi::GRAY));
    println!(
        "  {} {} {}",
        palette.paint(details.response.tier.name(), ansi::BLUE),
        palette.dim("│ trigger:"),
        palette.paint(&details.response.trigger, ansi::CYAN)
    );
    println!("  {}", palette.bold(palette.paint(&details.response.text, ansi::GREEN)));

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Cascade: {}",
        palette.paint(format!("{:?}", details.response.elapsed), ansi::GREEN),
        palette.paint(format!("{:?}", details.classify), ansi::CYAN),
    );
    println!();
}

fn fmt_pass(pass: &TierTrace, palette: &ansi::Palette) -> String {
    let label = palette.paint(format!("{}. {:<10}", pass.tier.rank(), pass.tier.name()), ansi::BLUE);
    let outcome = match &pass.trigger {
        Some(trigger) => palette.paint(format!("✓ {trigger}"), ansi::GREEN),
        None => palette.dim("✗ no match"),
    };
    format!("{} {} {}", label, outcome, palette.paint(format!("{:?}", pass.duration), ansi::YELLOW))
}
