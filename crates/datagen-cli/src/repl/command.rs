use std::path::PathBuf;

use regex::Regex;

use datagen_generate::{GenerationRequest, UpdateRequest};

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate(GenerationRequest),
    Update(UpdateRequest),
    Save { path: PathBuf },
    Show,
    Help,
    Exit,
    /// Input that matched no command; carries the trimmed text.
    Unknown(String),
}

/// Words dropped from entity phrases ("5 random student records").
const ENTITY_FILLER: &[&str] = &[
    "random", "fake", "sample", "synthetic", "test", "records", "record", "rows", "row",
    "entries", "entry", "of",
];

/// Words dropped around field names ("the email field").
const FIELD_FILLER: &[&str] = &["a", "an", "the", "field", "fields", "column", "columns"];

/// Case-insensitive, regex-based parser for the command loop.
#[derive(Debug, Clone)]
pub struct CommandParser {
    generate: Regex,
    add: Regex,
    remove: Regex,
    save: Regex,
    show: Regex,
    help: Regex,
    exit: Regex,
    list_separator: Regex,
}

impl CommandParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            generate: Regex::new(
                r"(?i)^(?:please\s+)?(?:generate|create|make|give\s+me)\s+(\d+)\s+(.+?)(?:\s+with\s+(.+))?$",
            )?,
            add: Regex::new(
                r"(?i)^(?:please\s+)?add\s+(.+?)(?:\s*,?\s+and\s+(?:remove|delete|drop)\s+(.+))?$",
            )?,
            remove: Regex::new(
                r"(?i)^(?:please\s+)?(?:remove|delete|drop)\s+(.+?)(?:\s*,?\s+and\s+add\s+(.+))?$",
            )?,
            save: Regex::new(
                r"(?i)^(?:save|export)(?:\s+(?:them|it|this|records|the\s+records))?(?:\s+(?:to|as|into|in))?\s+(.+)$",
            )?,
            show: Regex::new(r"(?i)^(?:show|list|print|display)\b")?,
            help: Regex::new(r"(?i)^(?:help|\?|h)$")?,
            exit: Regex::new(r"(?i)^(?:exit|quit|q)$")?,
            list_separator: Regex::new(r"(?i)\s*,\s*(?:and\s+)?|\s+and\s+|\s*&\s*")?,
        })
    }

    pub fn parse(&self, input: &str) -> Command {
        let line = input.trim();

        if let Some(caps) = self.generate.captures(line) {
            let entity = clean_entity(caps.get(2).map_or("", |m| m.as_str()));
            let fields = caps
                .get(3)
                .map(|m| self.split_fields(m.as_str()))
                .unwrap_or_default();
            // Counts beyond u32 fall through to Unknown.
            if let Ok(count) = caps[1].parse::<u32>() {
                if !entity.is_empty() {
                    return Command::Generate(GenerationRequest::new(count, entity, fields));
                }
            }
        } else if let Some(caps) = self.add.captures(line) {
            return Command::Update(UpdateRequest {
                add: self.split_fields(&caps[1]),
                remove: caps
                    .get(2)
                    .map(|m| self.split_fields(m.as_str()))
                    .unwrap_or_default(),
            });
        } else if let Some(caps) = self.remove.captures(line) {
            return Command::Update(UpdateRequest {
                add: caps
                    .get(2)
                    .map(|m| self.split_fields(m.as_str()))
                    .unwrap_or_default(),
                remove: self.split_fields(&caps[1]),
            });
        } else if let Some(caps) = self.save.captures(line) {
            let path = caps[1].trim().trim_matches(|ch| ch == '"' || ch == '\'');
            if !path.is_empty() {
                return Command::Save {
                    path: PathBuf::from(path),
                };
            }
        } else if self.show.is_match(line) {
            return Command::Show;
        } else if self.help.is_match(line) {
            return Command::Help;
        } else if self.exit.is_match(line) {
            return Command::Exit;
        }

        Command::Unknown(line.to_string())
    }

    /// Split "name, age and date of birth" into labels, dropping filler words.
    fn split_fields(&self, raw: &str) -> Vec<String> {
        self.list_separator
            .split(raw.trim().trim_end_matches(['.', '!']))
            .map(strip_field_filler)
            .filter(|field| !field.is_empty())
            .collect()
    }
}

/// Drop filler words; a phrase made only of filler keeps its last word
/// ("5 records" still names the generic entity).
fn clean_entity(raw: &str) -> String {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let kept: Vec<&str> = words
        .iter()
        .copied()
        .filter(|word| !ENTITY_FILLER.iter().any(|filler| word.eq_ignore_ascii_case(filler)))
        .collect();
    if kept.is_empty() {
        words.last().map(|word| word.to_string()).unwrap_or_default()
    } else {
        kept.join(" ")
    }
}

fn strip_field_filler(raw: &str) -> String {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let is_filler = |word: &&str| FIELD_FILLER.iter().any(|filler| word.eq_ignore_ascii_case(filler));
    let start = words.iter().position(|word| !is_filler(word));
    let end = words.iter().rposition(|word| !is_filler(word));
    match (start, end) {
        (Some(start), Some(end)) => words[start..=end].join(" "),
        _ => String::new(),
    }
}
