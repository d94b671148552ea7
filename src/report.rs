//! Rendering discovered rules for the console

use crate::apriori::FrequentItemsets;
use crate::itemset::Item;
use crate::rules::Rule;
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// JSON array of rule objects
    Json,
}

/// One rule per block, confidence as a percentage
pub fn render_text<T: Item + Display>(rules: &[Rule<T>]) -> String {
    let mut out = String::new();
    for rule in rules {
        out.push_str(&format!(
            "{} --> {}\n\tSupport: {}, Confidence: {:.1}%",
            rule.antecedent,
            rule.consequent,
            rule.support,
            rule.confidence * 100.0
        ));
        if let Some(lift) = rule.lift {
            out.push_str(&format!(", Lift: {lift:.2}"));
        }
        out.push_str("\n\n");
    }
    out
}

pub fn render_json<T: Item + Serialize>(rules: &[Rule<T>]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(rules)?)
}

/// Write at most `top` rules (all when `None`) in `format`
pub fn write_rules<T, W>(
    writer: &mut W,
    rules: &[Rule<T>],
    format: OutputFormat,
    top: Option<usize>,
) -> crate::Result<()>
where
    T: Item + Display + Serialize,
    W: Write,
{
    let shown = &rules[..top.map_or(rules.len(), |n| n.min(rules.len()))];
    match format {
        OutputFormat::Text => writer.write_all(render_text(shown).as_bytes())?,
        OutputFormat::Json => writeln!(writer, "{}", render_json(shown)?)?,
    }
    Ok(())
}

/// Count of frequent itemsets per size, e.g. `size 1: 3, size 2: 3`
pub fn level_summary<T: Item>(frequent: &FrequentItemsets<T>) -> String {
    frequent
        .level_sizes()
        .iter()
        .enumerate()
        .map(|(i, count)| format!("size {}: {count}", i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itemset::Itemset;

    fn sample_rules() -> Vec<Rule<u32>> {
        vec![
            Rule {
                antecedent: Itemset::from([2]),
                consequent: Itemset::from([1]),
                support: 2,
                confidence: 2.0 / 3.0,
                lift: None,
            },
            Rule {
                antecedent: Itemset::from([1, 3]),
                consequent: Itemset::from([2]),
                support: 1,
                confidence: 0.5,
                lift: Some(1.25),
            },
        ]
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample_rules());
        assert!(text.starts_with("{2} --> {1}\n\tSupport: 2, Confidence: 66.7%\n\n"));
        assert!(text.contains("{1, 3} --> {2}\n\tSupport: 1, Confidence: 50.0%, Lift: 1.25"));
    }

    #[test]
    fn test_render_text_exact_blocks() {
        let text = render_text(&sample_rules());
        assert_eq!(
            text,
            "{2} --> {1}\n\tSupport: 2, Confidence: 66.7%\n\n\
             {1, 3} --> {2}\n\tSupport: 1, Confidence: 50.0%, Lift: 1.25\n\n"
        );
        assert_eq!(render_text::<u32>(&[]), "");

        let named = vec![Rule {
            antecedent: Itemset::from(["bread"]),
            consequent: Itemset::from(["milk"]),
            support: 3,
            confidence: 0.75,
            lift: None,
        }];
        assert_eq!(
            render_text(&named),
            "{bread} --> {milk}\n\tSupport: 3, Confidence: 75.0%\n\n"
        );
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample_rules()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["antecedent"], serde_json::json!([2]));
        assert_eq!(value[0]["support"], 2);
        assert!(value[0].get("lift").is_none());
        assert_eq!(value[1]["lift"], 1.25);
    }

    #[test]
    fn test_write_rules_top() {
        let mut out = Vec::new();
        write_rules(&mut out, &sample_rules(), OutputFormat::Text, Some(1)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("-->").count(), 1);

        let mut out = Vec::new();
        write_rules(&mut out, &sample_rules(), OutputFormat::Json, Some(10)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}
