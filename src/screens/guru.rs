use serde::Serialize;

/// One line of a formatted answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnswerBlock {
    Heading { text: String },
    Stat { key: String, value: String },
    Text { text: String },
}

/// Split a generated answer into headings, `key: value` stats and prose.
pub fn format_answer(answer: &str) -> Vec<AnswerBlock> {
    answer
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if line.starts_with('*') || line.starts_with('#') {
                let text: String = line.chars().filter(|c| *c != '*' && *c != '#').collect();
                AnswerBlock::Heading {
                    text: text.trim().to_string(),
                }
            } else if let Some((key, value)) = line.split_once(':') {
                AnswerBlock::Stat {
                    key: key.trim().to_string(),
                    value: value.trim().to_string(),
                }
            } else {
                AnswerBlock::Text {
                    text: line.trim().to_string(),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_answer_kinds() {
        let answer = "## Most titles\n\nMumbai Indians: 5 titles (2013, 2015)\nThey share the record.\n**Note**";
        let blocks = format_answer(answer);
        assert_eq!(
            blocks,
            vec![
                AnswerBlock::Heading { text: "Most titles".into() },
                AnswerBlock::Stat { key: "Mumbai Indians".into(), value: "5 titles (2013, 2015)".into() },
                AnswerBlock::Text { text: "They share the record.".into() },
                AnswerBlock::Heading { text: "Note".into() },
            ]
        );
    }

    #[test]
    fn test_stat_keeps_later_colons() {
        let blocks = format_answer("Final: 26 May 2024, 19:30 IST");
        assert_eq!(
            blocks,
            vec![AnswerBlock::Stat { key: "Final".into(), value: "26 May 2024, 19:30 IST".into() }]
        );
    }
}
