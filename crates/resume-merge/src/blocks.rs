//! Block expansion: repeatable regions rendered once per collection item.
//!
//! # Delimiter forms
//! - Current: `{#SKILLS} … {/SKILLS}` (one or more braces, inner whitespace ok)
//! - Legacy: `<!-- BEGIN SKILLS --> … <!-- END SKILLS -->`
//!
//! Both are recognised for every region, current first. A template may mix
//! them.
//!
//! # Non-nesting constraint
//! Capture is non-greedy: the first close marker with the region's name ends
//! the region. A region must not contain another region of the same name.
//! Templates that do will silently lose the content after the inner close;
//! this is kept as-is because existing templates depend on it.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::models::ResumeRecord;
use crate::vocabulary::Region;

/// The two independently supported region delimiter syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSyntax {
    Current,
    Legacy,
}

impl BlockSyntax {
    /// The order in which the block pass tries the syntaxes for each region.
    pub const PRIORITY: [BlockSyntax; 2] = [BlockSyntax::Current, BlockSyntax::Legacy];

    fn open(self, name: &str) -> String {
        match self {
            BlockSyntax::Current => format!(r"\{{+\s*#\s*{name}\s*\}}+"),
            BlockSyntax::Legacy => format!(r"<!--\s*BEGIN\s+{name}\s*-->"),
        }
    }

    fn close(self, name: &str) -> String {
        match self {
            BlockSyntax::Current => format!(r"\{{+\s*/\s*{name}\s*\}}+"),
            BlockSyntax::Legacy => format!(r"<!--\s*END\s+{name}\s*-->"),
        }
    }

    /// Pattern source for a whole region: open marker, non-greedy body in
    /// group 1, close marker.
    pub fn region_pattern(self, region: Region) -> String {
        let name = regex::escape(region.name());
        format!("{}(?s:(.*?)){}", self.open(&name), self.close(&name))
    }
}

struct BlockPattern {
    region: Region,
    syntax: BlockSyntax,
    pattern: Regex,
}

static BLOCK_PATTERNS: LazyLock<Vec<BlockPattern>> = LazyLock::new(|| {
    Region::ALL
        .iter()
        .flat_map(|&region| {
            BlockSyntax::PRIORITY.iter().map(move |&syntax| BlockPattern {
                region,
                syntax,
                pattern: Regex::new(&syntax.region_pattern(region))
                    .expect("region pattern is always valid"),
            })
        })
        .collect()
});

static REGION_SPANS: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = BLOCK_PATTERNS
        .iter()
        .map(|block| format!("(?:{})", block.pattern.as_str()))
        .collect();
    Regex::new(&alternatives.join("|")).expect("region alternation is always valid")
});

/// Matches any complete region of any name in either syntax.
pub(crate) fn region_spans() -> &'static Regex {
    &REGION_SPANS
}

/// Expands every recognised region in `text`.
///
/// Regions are visited in [`Region::ALL`] order, and for each region the
/// current syntax before the legacy one. A region whose collection is empty
/// or absent is replaced by nothing.
pub fn expand_blocks(text: &str, record: &ResumeRecord) -> String {
    let mut out = text.to_string();
    for block in BLOCK_PATTERNS.iter() {
        if !block.pattern.is_match(&out) {
            continue;
        }
        trace!(
            region = block.region.name(),
            syntax = ?block.syntax,
            items = block.region.item_count(record),
            "expanding block region"
        );
        out = block
            .pattern
            .replace_all(&out, |caps: &Captures| block.region.render(&caps[1], record))
            .into_owned();
    }
    out
}
