//! Style block partitioning.
//!
//! SCSS requires `@use` rules to appear before any other rule, so a block
//! cannot simply have the global stylesheet prepended to it. Each block is
//! split, line-wise, into module-inclusion directives and everything else;
//! the global source is interleaved between the two groups. This is textual
//! partitioning only - no SCSS parsing, no import resolution.

/// A style block split into import-like statements and the rest, both in
/// original relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedBlock {
    /// `@use` / `@import` statements, which must precede all other rules
    pub imports: Vec<String>,
    /// Every remaining statement
    pub other: Vec<String>,
}

/// Split newline-delimited SCSS statements into import-like directives and
/// all other statements. No statement is dropped or reordered within its
/// group; a block with no imports just yields an empty first group.
pub fn partition_block(source: &str) -> PartitionedBlock {
    let mut block = PartitionedBlock::default();
    for line in source.split('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with("@use") || trimmed.starts_with("@import") {
            block.imports.push(line.to_string());
        } else {
            block.other.push(line.to_string());
        }
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_splits_imports_from_rules() {
        let block = partition_block("@use 'x';\n.a { color: $c; }");
        assert_eq!(block.imports, vec!["@use 'x';"]);
        assert_eq!(block.other, vec![".a { color: $c; }"]);
    }

    #[test]
    fn test_partition_no_imports() {
        let block = partition_block(".a { color: red; }");
        assert!(block.imports.is_empty());
        assert_eq!(block.other, vec![".a { color: red; }"]);
    }

    #[test]
    fn test_partition_recognizes_indented_imports() {
        let block = partition_block("  @import 'reset';\n.a {}");
        assert_eq!(block.imports, vec!["  @import 'reset';"]);
        assert_eq!(block.other, vec![".a {}"]);
    }

    #[test]
    fn test_partition_preserves_every_statement_and_order() {
        let source = "@use 'a';\n.x { top: 0; }\n@import 'b';\n.y { left: 0; }\n\n.z {}";
        let block = partition_block(source);
        assert_eq!(block.imports, vec!["@use 'a';", "@import 'b';"]);
        assert_eq!(block.other, vec![".x { top: 0; }", ".y { left: 0; }", "", ".z {}"]);

        // Regrouped statements, blank lines aside, reproduce the input exactly
        let mut regrouped: Vec<&str> = Vec::new();
        regrouped.extend(block.imports.iter().map(String::as_str));
        regrouped.extend(block.other.iter().map(String::as_str));
        let original: Vec<&str> = source.split('\n').collect();
        assert_eq!(
            regrouped.iter().filter(|s| !s.is_empty()).count(),
            original.iter().filter(|s| !s.is_empty()).count()
        );
        for statement in original {
            assert!(regrouped.contains(&statement));
        }
    }
}
