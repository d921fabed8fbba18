//! Fuzzy status resolution for soul break and limit break effect text
//!
//! Effect text names statuses in square brackets, but the bracketed text
//! rarely matches a status name exactly: scaling values are abbreviated with
//! slashes ("ATK +10%/20%/30%") and status names use placeholders ("+X%",
//! "X%") where the effect text has concrete numbers. Each token is tried
//! against these strategies in order, stopping at the first that resolves.

use super::{MergeContext, MergeDiagnostics, PassStats};
use crate::error::Result;
use crate::model::{Id, Status};
use std::collections::{HashMap, HashSet};
use std::ops::Range;

pub(crate) const STATUSES: &str = "statuses";

/// Every bracketed token in `text`, in order
///
/// A token is the shortest run of at least one character between `[` and
/// `]` with no line break in it.
pub fn status_tokens(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'[' {
            i += 1;
            continue;
        }
        match bracket_end(bytes, i) {
            Some(close) => {
                tokens.push(&text[i + 1..close]);
                i = close + 1;
            }
            None => i += 1,
        }
    }
    tokens
}

fn bracket_end(bytes: &[u8], open: usize) -> Option<usize> {
    let first = open + 1;
    match bytes.get(first) {
        None | Some(b'\n') => return None,
        Some(_) => {}
    }
    bytes[first + 1..]
        .iter()
        .position(|&b| b == b']' || b == b'\n')
        .map(|offset| first + 1 + offset)
        .filter(|&close| bytes[close] == b']')
}

fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Byte ranges of the slash-joined scaling values in `token`, e.g. "10%/20%"
///
/// A run is two or more numeric segments joined by `/`, each segment digits
/// optionally followed by `%`. Runs are found left to right and never overlap.
pub fn scaling_runs(token: &str) -> Vec<Range<usize>> {
    let bytes = token.as_bytes();
    let mut runs = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        match scaling_run_at(bytes, start) {
            Some(end) => {
                runs.push(start..end);
                start = end;
            }
            None => start += 1,
        }
    }
    runs
}

fn scaling_run_at(bytes: &[u8], start: usize) -> Option<usize> {
    let value_len = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|&&b| b.is_ascii_digit() || b == b'%')
            .count()
    };

    // start offsets of the "N%/" segments
    let mut segments = Vec::new();
    let mut pos = start;
    loop {
        let digits = digit_run(bytes, pos);
        if digits == 0 {
            break;
        }
        let mut end = pos + digits;
        while bytes.get(end) == Some(&b'%') {
            end += 1;
        }
        if bytes.get(end) != Some(&b'/') {
            break;
        }
        segments.push(pos);
        pos = end + 1;
    }

    if segments.is_empty() {
        return None;
    }
    let tail = value_len(pos);
    if tail > 0 {
        return Some(pos + tail);
    }
    // nothing after the last slash: the last segment becomes the final value
    if segments.len() < 2 {
        return None;
    }
    let last = segments.pop()?;
    Some(last + value_len(last))
}

/// Signed percentages ("+10%", "-20%", "+%"), left to right
pub fn signed_percentage_matches(token: &str) -> Vec<&str> {
    let bytes = token.as_bytes();
    let mut matches = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'+' || bytes[i] == b'-' {
            let digits = digit_run(bytes, i + 1);
            let percent = i + 1 + digits;
            if bytes.get(percent) == Some(&b'%') {
                matches.push(&token[i..=percent]);
                i = percent + 1;
                continue;
            }
        }
        i += 1;
    }
    matches
}

/// Unsigned percentages ("30%", "%"), left to right
pub fn percentage_matches(token: &str) -> Vec<&str> {
    let bytes = token.as_bytes();
    let mut matches = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let digits = digit_run(bytes, i);
        let percent = i + digits;
        if bytes.get(percent) == Some(&b'%') {
            matches.push(&token[i..=percent]);
            i = percent + 1;
        } else {
            i += digits.max(1);
        }
    }
    matches
}

/// Statuses found in one piece of effect text
#[derive(Debug, Default)]
pub struct StatusResolution<'a> {
    pub statuses: Vec<&'a Status>,
    /// Tokens no strategy could resolve, as written
    pub missing: Vec<String>,
}

/// Name index over the status collection
#[derive(Debug)]
pub struct StatusResolver<'a> {
    statuses: &'a [Status],
    by_name: HashMap<&'a str, usize>,
}

impl<'a> StatusResolver<'a> {
    pub fn new(statuses: &'a [Status]) -> Self {
        let mut by_name = HashMap::new();
        for (index, status) in statuses.iter().enumerate() {
            let name = status.common_name.trim();
            if !name.is_empty() {
                by_name.entry(name).or_insert(index);
            }
        }
        Self { statuses, by_name }
    }

    /// Exact match on the trimmed name
    fn find(&self, name: &str) -> Option<&'a Status> {
        let statuses = self.statuses;
        self.by_name.get(name.trim()).map(|&index| &statuses[index])
    }

    /// Resolve a single bracketed token; empty when nothing matched
    pub fn resolve_token(&self, token: &str) -> Vec<&'a Status> {
        if let Some(status) = self.find(token) {
            return vec![status];
        }

        if token.contains('/') {
            if let [run] = scaling_runs(token).as_slice() {
                let begin = &token[..run.start];
                let end = &token[run.end..];
                let expanded: Vec<_> = token[run.clone()]
                    .split('/')
                    .filter_map(|piece| self.find(&format!("{}{}{}", begin, piece, end)))
                    .collect();
                if !expanded.is_empty() {
                    return expanded;
                }
            }
        }

        for value in signed_percentage_matches(token) {
            if let Some(status) = self.find(&token.replace(value, "+X%")) {
                return vec![status];
            }
        }
        for value in percentage_matches(token) {
            if let Some(status) = self.find(&token.replace(value, "X%")) {
                return vec![status];
            }
        }

        Vec::new()
    }

    /// Resolve every bracketed token in `text`
    pub fn resolve(&self, text: &str) -> StatusResolution<'a> {
        let mut resolution = StatusResolution::default();
        for token in status_tokens(text) {
            let found = self.resolve_token(token);
            if found.is_empty() {
                resolution.missing.push(token.to_string());
            } else {
                resolution.statuses.extend(found);
            }
        }
        resolution
    }

    /// `resolve`, plus the statuses named in each resolved status's own
    /// effect text (one level deep), deduplicated by id in first-seen order
    pub fn resolve_with_inner(&self, text: &str) -> StatusResolution<'a> {
        let outer = self.resolve(text);
        let mut missing = outer.missing;
        let mut all = outer.statuses.clone();

        for status in &outer.statuses {
            let inner = self.resolve(&status.effects);
            all.extend(inner.statuses);
            missing.extend(inner.missing);
        }

        let mut seen: HashSet<Id> = HashSet::new();
        all.retain(|status| seen.insert(status.id));
        StatusResolution {
            statuses: all,
            missing,
        }
    }
}

fn attach(
    resolution: StatusResolution<'_>,
    record: &str,
    diagnostics: &mut MergeDiagnostics,
    stats: &mut PassStats,
) -> Vec<Status> {
    if !resolution.statuses.is_empty() {
        stats.touched += 1;
        tracing::debug!(record, count = resolution.statuses.len(), "wired up statuses");
    }
    if !resolution.missing.is_empty() {
        stats.unresolved += 1;
    }
    for token in &resolution.missing {
        diagnostics.record_missing_status(token);
    }
    resolution.statuses.into_iter().cloned().collect()
}

/// Statuses → SoulBreak and LimitBreak
pub(crate) fn wire_statuses(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(STATUSES);
    let graph = &mut ctx.graph;
    let diagnostics = &mut ctx.diagnostics;
    let resolver = StatusResolver::new(&graph.statuses);

    for soul_break in graph.soul_breaks.iter_mut() {
        let resolution = resolver.resolve_with_inner(&soul_break.action.effects);
        soul_break.statuses = attach(resolution, &soul_break.description, diagnostics, &mut stats);
    }
    for limit_break in graph.limit_breaks.iter_mut() {
        let resolution = resolver.resolve_with_inner(&limit_break.action.effects);
        limit_break.statuses = attach(resolution, &limit_break.description, diagnostics, &mut stats);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeOptions;
    use crate::fixtures;

    fn statuses(names: &[(&str, &str)]) -> Vec<Status> {
        (1..)
            .zip(names)
            .map(|(id, (name, effects))| Status {
                id,
                description: name.to_string(),
                common_name: name.to_string(),
                effects: effects.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn names(found: &[&Status]) -> Vec<String> {
        found.iter().map(|s| s.common_name.clone()).collect()
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(status_tokens("Grants [Haste] and [Protect], []"), vec!["Haste", "Protect"]);
        assert_eq!(status_tokens("[a\nb] then [Shell]"), vec!["Shell"]);
        assert_eq!(status_tokens("no brackets here"), Vec::<&str>::new());
        assert_eq!(status_tokens("[Blink 1] [unclosed"), vec!["Blink 1"]);
    }

    #[test]
    fn test_scaling_runs() {
        assert_eq!(scaling_runs("ATK/DEF +10%/20%"), vec![9..16]);
        assert_eq!(scaling_runs("3/4 and 5%/6%"), vec![0..3, 8..13]);
        assert_eq!(scaling_runs("1/2/"), vec![0..3]);
        assert!(scaling_runs("10%/x").is_empty());
        assert!(scaling_runs("ATK/DEF").is_empty());
    }

    #[test]
    fn test_percentage_matches() {
        assert_eq!(signed_percentage_matches("ATK +10%, DEF -%, MAG +x%"), vec!["+10%", "-%"]);
        assert_eq!(percentage_matches("Imperil Fire 30% and 5a%"), vec!["30%", "%"]);
    }

    #[test]
    fn test_exact_match_trims() {
        let all = statuses(&[("Haste", ""), ("  Protect ", "")]);
        let resolver = StatusResolver::new(&all);

        let resolution = resolver.resolve("[Haste] [ Protect]");
        assert_eq!(names(&resolution.statuses), vec!["Haste", "  Protect "]);
        assert!(resolution.missing.is_empty());
    }

    #[test]
    fn test_slash_scaling_expands_into_each_value() {
        let all = statuses(&[("ATK/DEF +10%", ""), ("ATK/DEF +20%", ""), ("ATK +10%", "")]);
        let resolver = StatusResolver::new(&all);

        let found = resolver.resolve_token("ATK/DEF +10%/20%");
        assert_eq!(names(&found), vec!["ATK/DEF +10%", "ATK/DEF +20%"]);
    }

    #[test]
    fn test_failed_scaling_falls_through_to_raw_token() {
        let all = statuses(&[("Reraise 1/2 +X%", "")]);
        let resolver = StatusResolver::new(&all);

        let found = resolver.resolve_token("Reraise 1/2 +30%");
        assert_eq!(names(&found), vec!["Reraise 1/2 +X%"]);
    }

    #[test]
    fn test_percentage_placeholders() {
        let all = statuses(&[("DEF and RES +X%", ""), ("Imperil Fire X%", "")]);
        let resolver = StatusResolver::new(&all);

        assert_eq!(names(&resolver.resolve_token("DEF and RES +200%")), vec!["DEF and RES +X%"]);
        assert_eq!(names(&resolver.resolve_token("Imperil Fire 30%")), vec!["Imperil Fire X%"]);
        assert!(resolver.resolve_token("Imperil Ice 30%").is_empty());
    }

    #[test]
    fn test_inner_statuses_deduplicated_in_first_seen_order() {
        let all = statuses(&[
            ("Haste", ""),
            ("Attack Boost", "Grants [Haste] and [Protect]"),
            ("Protect", ""),
        ]);
        let resolver = StatusResolver::new(&all);

        let resolution = resolver.resolve_with_inner("[Haste], [Attack Boost]");
        assert_eq!(names(&resolution.statuses), vec!["Haste", "Attack Boost", "Protect"]);
    }

    #[test]
    fn test_unknown_token_is_reported_once() {
        let mut graph = fixtures::sample_graph();
        graph.soul_breaks[0].action.effects = "[Haste] [Unknown Buff Xyz]".to_string();
        graph.limit_breaks[0].action.effects = "[Unknown Buff Xyz]".to_string();
        let mut ctx = MergeContext::new(graph, MergeOptions::default());

        let stats = wire_statuses(&mut ctx).unwrap();

        assert_eq!(ctx.diagnostics.missing_statuses, vec!["Unknown Buff Xyz"]);
        assert_eq!(stats.unresolved, 2);
        let soul_break = &ctx.graph.soul_breaks[0];
        assert_eq!(soul_break.statuses.len(), 1);
        assert_eq!(soul_break.statuses[0].common_name, "Haste");
        assert!(ctx.graph.limit_breaks[0].statuses.is_empty());
    }
}
