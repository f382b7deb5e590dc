//! The idempotent upsert operations the importer issues.
//!
//! Each operation is a named, parameterized Cypher statement executed inside
//! its own write transaction. Node upserts MERGE by `(label, name)`; edge
//! upserts MATCH both endpoints and MERGE the relationship, so a missing
//! endpoint makes the statement a zero-row no-op rather than an error.

use crate::records::SubjectRecord;

/// Fixed identity of the singleton root node.
pub const MAIN_NODE_NAME: &str = "test";

/// A single idempotent graph mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOp {
    /// Ensure the singleton `Main` root node exists.
    EnsureMain,
    EnsureUnit { unit: String },
    EnsureChapter { chapter: String },
    EnsureSection { section: String },
    /// Ensure one `include` edge Main → Unit. Both endpoints must already
    /// exist; otherwise the operation matches nothing and succeeds.
    EnsureIncludeEdge { unit: String },
    EnsureHasChapterEdge { unit: String, chapter: String },
    EnsureHasSectionEdge { chapter: String, section: String },
}

impl UpsertOp {
    /// The six per-record operations, in the order the importer must issue
    /// them: all three nodes before any edge, so every edge upsert runs
    /// after both of its endpoints have been ensured.
    pub fn for_record(record: &SubjectRecord) -> [UpsertOp; 6] {
        [
            UpsertOp::EnsureUnit {
                unit: record.unit.clone(),
            },
            UpsertOp::EnsureChapter {
                chapter: record.chapter.clone(),
            },
            UpsertOp::EnsureSection {
                section: record.section.clone(),
            },
            UpsertOp::EnsureIncludeEdge {
                unit: record.unit.clone(),
            },
            UpsertOp::EnsureHasChapterEdge {
                unit: record.unit.clone(),
                chapter: record.chapter.clone(),
            },
            UpsertOp::EnsureHasSectionEdge {
                chapter: record.chapter.clone(),
                section: record.section.clone(),
            },
        ]
    }

    /// The parameterized Cypher statement for this operation.
    pub fn cypher(&self) -> &'static str {
        match self {
            UpsertOp::EnsureMain => "MERGE (m:Main {name: $name})",
            UpsertOp::EnsureUnit { .. } => "MERGE (u:Unit {name: $unit})",
            UpsertOp::EnsureChapter { .. } => "MERGE (c:Chapter {name: $chapter})",
            UpsertOp::EnsureSection { .. } => "MERGE (s:Section {name: $section})",
            UpsertOp::EnsureIncludeEdge { .. } => {
                "MATCH (m:Main {name: $name}), (u:Unit {name: $unit}) \
                 MERGE (m)-[:include]->(u)"
            }
            UpsertOp::EnsureHasChapterEdge { .. } => {
                "MATCH (u:Unit {name: $unit}), (c:Chapter {name: $chapter}) \
                 MERGE (u)-[:has_chapter]->(c)"
            }
            UpsertOp::EnsureHasSectionEdge { .. } => {
                "MATCH (c:Chapter {name: $chapter}), (s:Section {name: $section}) \
                 MERGE (c)-[:has_section]->(s)"
            }
        }
    }

    /// Name/value pairs for the statement's parameters.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        match self {
            UpsertOp::EnsureMain => vec![("name", MAIN_NODE_NAME)],
            UpsertOp::EnsureUnit { unit } => vec![("unit", unit)],
            UpsertOp::EnsureChapter { chapter } => vec![("chapter", chapter)],
            UpsertOp::EnsureSection { section } => vec![("section", section)],
            UpsertOp::EnsureIncludeEdge { unit } => {
                vec![("name", MAIN_NODE_NAME), ("unit", unit)]
            }
            UpsertOp::EnsureHasChapterEdge { unit, chapter } => {
                vec![("unit", unit), ("chapter", chapter)]
            }
            UpsertOp::EnsureHasSectionEdge { chapter, section } => {
                vec![("chapter", chapter), ("section", section)]
            }
        }
    }
}
