//! Named-placeholder templates for headers and post lines.
//!
//! A template is plain text with `{name}` slots. `{{` and `}}` stand for
//! literal braces. Empty (`{}`) and numeric (`{0}`) slots are positional and
//! never count as placeholders; they are written back out unchanged. Anything
//! after `!` or `:` inside a slot is stripped from the name and not applied.
//! Slots nested in a format spec, such as `{title:{width}}`, are not supported
//! and make the template malformed.

use std::collections::BTreeSet;

use crate::{
    Res,
    error::Error,
    types::{SortingOption, Submission, TimeFilterOption},
};

/// Placeholders a header template may use.
pub const HEADER_KEYS: [&str; 3] = ["sorting", "time", "subreddit"];

pub const DEFAULT_HEADER: &str = "#### The {sorting} Posts for {time} from {subreddit}";
pub const DEFAULT_OUTPUT_FORMAT: &str = "- {title}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(String),
    Named(&'a str),
    Positional(&'a str),
}

#[derive(Debug, Clone)]
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    pub fn parse(template: &'a str) -> Res<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(idx) = rest.find(&['{', '}'][..]) {
            literal.push_str(&rest[..idx]);
            let brace = rest.as_bytes()[idx];
            let after = &rest[idx + 1..];

            if after.as_bytes().first() == Some(&brace) {
                literal.push(brace as char);
                rest = &after[1..];
                continue;
            }

            if brace == b'}' {
                return Err(Error::MalformedTemplate(format!(
                    "single '}}' encountered in \"{template}\""
                )));
            }

            let end = match after.find(&['{', '}'][..]) {
                Some(end) if after.as_bytes()[end] == b'}' => end,
                _ => {
                    return Err(Error::MalformedTemplate(format!(
                        "unmatched '{{' in \"{template}\""
                    )));
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(slot(&after[..end]));
            rest = &after[end + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Named placeholders in the template, deduplicated and sorted.
    pub fn keys(&self) -> BTreeSet<String> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Named(name) => Some(name.to_string()),
                _ => None,
            })
            .collect()
    }

    /// Substitutes every named placeholder with the value `lookup` returns for it.
    pub fn render<F>(&self, mut lookup: F) -> Res<String>
    where
        F: FnMut(&str) -> Res<String>,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Named(name) => out.push_str(&lookup(name)?),
                Segment::Positional(raw) => {
                    out.push('{');
                    out.push_str(raw);
                    out.push('}');
                }
            }
        }
        Ok(out)
    }
}

fn slot(inner: &str) -> Segment<'_> {
    let name = inner
        .find(&['!', ':'][..])
        .map_or(inner, |idx| &inner[..idx]);
    if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
        Segment::Positional(inner)
    } else {
        Segment::Named(name)
    }
}

/// Returns the named placeholders of `template`, or `None` when it has none.
pub fn get_template_keys(template: &str) -> Res<Option<BTreeSet<String>>> {
    let keys = Template::parse(template)?.keys();
    Ok((!keys.is_empty()).then_some(keys))
}

pub fn create_header(
    template: &str,
    sorting: SortingOption,
    time: TimeFilterOption,
    subreddit: &str,
) -> Res<String> {
    let parsed = Template::parse(template)?;

    let invalid: Vec<String> = parsed
        .keys()
        .into_iter()
        .filter(|key| !HEADER_KEYS.contains(&key.as_str()))
        .collect();
    if !invalid.is_empty() {
        return Err(Error::InvalidTemplateKey(invalid.join(", ")));
    }

    parsed.render(|key| {
        Ok(match key {
            "sorting" => sorting.label().to_string(),
            "time" => time.label().to_string(),
            _ => format!("r/{subreddit}"),
        })
    })
}

pub fn create_post_output(template: &str, posts: &[Submission]) -> Res<Vec<String>> {
    let parsed = Template::parse(template)?;
    if parsed.keys().is_empty() {
        return Err(Error::EmptyOutputTemplate);
    }

    posts
        .iter()
        .map(|post| {
            parsed.render(|key| post.field(key).ok_or_else(|| Error::MissingField(key.to_string())))
        })
        .collect()
}
