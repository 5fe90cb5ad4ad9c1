//! Terminal rendering of run events and snapshots

use agent_core::AgentEvent;
use agent_stock::FinancialSnapshot;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use serde_json::Value;

const PREVIEW_CHARS: usize = 300;

/// Human-readable text for one event
pub fn describe(event: &AgentEvent) -> String {
    match event {
        AgentEvent::Thought { agent, text } => format!("🤔 Thinking ({agent})\n{text}\n"),
        AgentEvent::ToolCall {
            agent, tool, input, ..
        } => format!("🛠️ Calling Tool: {tool} ({agent})\n   input: {}", preview(input)),
        AgentEvent::ToolResult {
            tool,
            output,
            is_error,
            duration_ms,
            ..
        } => {
            let mark = if *is_error {
                "❌ Tool Failed"
            } else {
                "✅ Tool Finished"
            };
            format!("{mark}: {tool} in {duration_ms} ms\n   output: {}", preview(output))
        }
        AgentEvent::Text { agent, text } => format!("💬 {agent}\n{text}\n"),
        AgentEvent::Delegated {
            agent,
            target,
            reason,
        } => {
            if reason.is_empty() {
                format!("➡️ {agent} → {target}")
            } else {
                format!("➡️ {agent} → {target} ({reason})")
            }
        }
        AgentEvent::Final { agent, .. } => {
            format!("{}\n🎉 {agent} finished\n{}", "=".repeat(60), "=".repeat(60))
        }
        AgentEvent::Error { agent, message } => format!("❌ {agent} failed: {message}"),
    }
}

/// One JSON line for an event
pub fn to_json_line(event: &AgentEvent) -> serde_json::Result<String> {
    serde_json::to_string(event)
}

fn preview(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.chars().count() <= PREVIEW_CHARS {
        return text;
    }
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}…")
}

/// Table view of a snapshot
pub fn snapshot_table(ticker: &str, snapshot: &FinancialSnapshot) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", ticker]);

    if let Some(error) = snapshot.error() {
        table.add_row(vec!["Error", error]);
        return table;
    }

    let text = |v: Option<&str>| v.unwrap_or("n/a").to_string();
    let ratio = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));

    let rows = [
        ("Company", text(snapshot.company_name())),
        ("Sector", text(snapshot.sector())),
        ("Industry", text(snapshot.industry())),
        (
            "Market cap",
            snapshot
                .market_cap()
                .map_or_else(|| "n/a".to_string(), format_large),
        ),
        ("Trailing P/E", ratio(snapshot.pe_ratio())),
        ("Forward P/E", ratio(snapshot.forward_pe())),
        (
            "Dividend yield",
            snapshot
                .dividend_yield()
                .map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v * 100.0)),
        ),
        ("Price/book", ratio(snapshot.price_to_book())),
        ("52w high", ratio(snapshot.fifty_two_week_high())),
        ("52w low", ratio(snapshot.fifty_two_week_low())),
        (
            "Avg volume",
            snapshot
                .average_volume()
                .map_or_else(|| "n/a".to_string(), |v| format_large(v as f64)),
        ),
        ("Summary", text(snapshot.short_summary())),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table
}

fn format_large(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else {
        format!("{value:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_tool_events() {
        let call = AgentEvent::ToolCall {
            agent: "FundamentalAnalyst".to_string(),
            id: "1".to_string(),
            tool: "get_financial_data".to_string(),
            input: json!({"ticker": "GOOGL"}),
        };
        let text = describe(&call);
        assert!(text.starts_with("🛠️ Calling Tool: get_financial_data"));
        assert!(text.contains("GOOGL"));

        let result = AgentEvent::ToolResult {
            agent: "FundamentalAnalyst".to_string(),
            id: "1".to_string(),
            tool: "get_financial_data".to_string(),
            output: json!({"error": "boom"}),
            is_error: true,
            duration_ms: 12,
        };
        assert!(describe(&result).starts_with("❌ Tool Failed: get_financial_data in 12 ms"));
    }

    #[test]
    fn test_describe_flow_events() {
        let thought = AgentEvent::Thought {
            agent: "ChiefInvestmentOfficer".to_string(),
            text: "start with fundamentals".to_string(),
        };
        assert!(describe(&thought).starts_with("🤔 Thinking"));

        let delegated = AgentEvent::Delegated {
            agent: "Coordinator".to_string(),
            target: "terraform_config_gen".to_string(),
            reason: String::new(),
        };
        assert_eq!(describe(&delegated), "➡️ Coordinator → terraform_config_gen");

        let done = AgentEvent::Final {
            agent: "Coordinator".to_string(),
            text: "resource {}".to_string(),
        };
        assert!(describe(&done).contains("🎉 Coordinator finished"));
    }

    #[test]
    fn test_preview_truncates() {
        let long = Value::String("x".repeat(PREVIEW_CHARS + 10));
        let out = preview(&long);
        assert!(out.ends_with('…'));
        assert_eq!(out.chars().count(), PREVIEW_CHARS + 1);
    }

    #[test]
    fn test_json_line() {
        let event = AgentEvent::Error {
            agent: "Coordinator".to_string(),
            message: "boom".to_string(),
        };
        let line = to_json_line(&event).unwrap();
        assert!(line.contains("\"type\":\"error\""));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_snapshot_table() {
        let snapshot = serde_json::from_value::<FinancialSnapshot>(json!({
            "company_name": "Alphabet Inc.",
            "market_cap": 2.1e12,
            "dividend_yield": 0.0046,
        }))
        .unwrap();
        let rendered = snapshot_table("GOOGL", &snapshot).to_string();

        assert!(rendered.contains("GOOGL"));
        assert!(rendered.contains("Alphabet"));
        assert!(rendered.contains("2.10T"));
        assert!(rendered.contains("0.46%"));
        assert!(rendered.contains("n/a"));
    }

    #[test]
    fn test_failure_table() {
        let snapshot = FinancialSnapshot::failure("ZZZZ", "not found");
        let rendered = snapshot_table("ZZZZ", &snapshot).to_string();
        assert!(rendered.contains("Error"));
        assert!(rendered.contains("ZZZZ"));
        assert!(!rendered.contains("Company"));
    }
}
