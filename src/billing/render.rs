use super::statement::StatementResult;
use std::fmt::Write as _;
use std::str::FromStr;

const CENTS_PER_DOLLAR: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl OutputFormat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Json => "json",
        }
    }

    pub fn render(self, statement: &StatementResult) -> Result<String, serde_json::Error> {
        match self {
            Self::Text => Ok(render_text(statement)),
            Self::Html => Ok(render_html(statement)),
            Self::Json => render_json(statement),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported statement format '{other}'")),
        }
    }
}

/// Formats cents as US dollars, e.g. `147500` as `$1,475.00`.
pub fn usd(cents: u64) -> String {
    let dollars = (cents / CENTS_PER_DOLLAR).to_string();
    let remainder = cents % CENTS_PER_DOLLAR;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("${grouped}.{remainder:02}")
}

pub fn render_text(statement: &StatementResult) -> String {
    let mut out = format!("Statement for {}\n", statement.customer);
    for line in &statement.lines {
        let _ = writeln!(
            out,
            "  {}: {} ({} seats)",
            line.play_name,
            usd(line.amount),
            line.audience
        );
    }
    let _ = writeln!(out, "Amount owed is {}", usd(statement.total_amount));
    let _ = writeln!(out, "You earned {} credits", statement.total_volume_credits);
    out
}

/// Customer and play names are inserted verbatim, without HTML escaping.
pub fn render_html(statement: &StatementResult) -> String {
    let mut out = String::from("<html>\n");
    let _ = writeln!(out, "<h1>Statement for {}</h1>", statement.customer);
    out.push_str("<ul>\n");
    for line in &statement.lines {
        let _ = writeln!(
            out,
            "<li>{}: {} ({} seats)</li>",
            line.play_name,
            usd(line.amount),
            line.audience
        );
    }
    out.push_str("</ul>\n");
    let _ = writeln!(out, "<p>Amount owed is {}</p>", usd(statement.total_amount));
    let _ = writeln!(
        out,
        "<p>You earned {} credits</p>",
        statement.total_volume_credits
    );
    out.push_str("</html>");
    out
}

pub fn render_json(statement: &StatementResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(statement)
}
