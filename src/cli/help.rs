use colored::Colorize;
use std::io::{self, Write};

pub struct RenderOpts {
    pub show_examples: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        RenderOpts {
            show_examples: true,
        }
    }
}

/// Help for the interactive calculator
pub fn render_help<W: Write>(mut out: W, opts: &RenderOpts) -> io::Result<()> {
    writeln!(out, "{}", "etfcalc - Interactive Help".bold())?;
    writeln!(out)?;

    writeln!(out, "{}", "Choose a regime:".bold())?;
    writeln!(
        out,
        "  {:28} - Select the fee regime",
        "regime <intraday|delivery>"
    )?;
    writeln!(out, "  {:28} - Show both fee schedules", "regimes")?;

    writeln!(out)?;
    writeln!(out, "{}", "Fill in the trade:".bold())?;
    writeln!(
        out,
        "  {:28} - Set a field (no value clears it)",
        "set <buy|sell|qty> <value>"
    )?;
    writeln!(out, "  {:28} - Shorthand for set", "buy|sell|qty <value>")?;

    writeln!(out)?;
    writeln!(out, "{}", "Calculate:".bold())?;
    writeln!(
        out,
        "  {:28} - Calculate from the form or the given values",
        "calc [<buy> <sell> <qty>]"
    )?;
    writeln!(out, "  {:28} - Show the form and last result", "show")?;
    writeln!(out, "  {:28} - Clear the form and result", "reset")?;
    writeln!(out, "  {:28} - Back to regime selection", "back")?;

    writeln!(out)?;
    writeln!(out, "{}", "Session:".bold())?;
    writeln!(out, "  {:28} - Show this help", "help")?;
    writeln!(out, "  {:28} - Exit the calculator", "exit")?;

    writeln!(out)?;
    if opts.show_examples {
        writeln!(out, "{}", "Examples:".bold())?;
        writeln!(out, "  regime intraday")?;
        writeln!(out, "  calc 100 105 100")?;
        writeln!(out, "  set qty 250")?;
        writeln!(out, "  calc")?;
        writeln!(out)?;
    }

    Ok(())
}
