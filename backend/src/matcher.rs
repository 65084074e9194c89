//! Response matcher
//!
//! Maps free text to exactly one response of a [`KnowledgeBase`]:
//!
//! 1. exact pass: the first key (entry order, then key order) contained in
//!    the lowercased input wins;
//! 2. related pass: for each whitespace token of at least three characters,
//!    in input order, the first key that contains the token or is contained
//!    by it wins;
//! 3. otherwise the default response.
//!
//! The related pass checks containment in both directions, so very short
//! keys (e.g. "ei") match any longer token that happens to include them.
//! That behaviour is kept as authored.

use crate::knowledge::KnowledgeBase;
use serde::Serialize;

/// Minimum token length, in characters, considered by the related pass
pub const MIN_TOKEN_CHARS: usize = 3;

/// Which pass selected a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "pass", rename_all = "lowercase")]
pub enum MatchPass {
    /// A key occurred verbatim in the input
    Exact {
        /// Entry index
        entry: usize,
        /// Matching key
        key: String,
    },
    /// A token and a key overlapped
    Related {
        /// Entry index
        entry: usize,
        /// Matching key
        key: String,
        /// Input token that overlapped the key
        token: String,
    },
    /// Nothing matched
    Default,
}

/// Result of matching one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'kb> {
    /// Selected response text
    pub response: &'kb str,
    /// How it was selected
    pub pass: MatchPass,
}

/// Select the response for `input`
pub fn respond<'kb>(kb: &'kb KnowledgeBase, input: &str) -> &'kb str {
    find_match(kb, input).response
}

/// Select the response for `input`, reporting which pass produced it
pub fn find_match<'kb>(kb: &'kb KnowledgeBase, input: &str) -> Match<'kb> {
    let normalized = input.to_lowercase();

    for (index, entry) in kb.entries().iter().enumerate() {
        if let Some(key) = entry.keys.iter().find(|k| normalized.contains(k.as_str())) {
            return Match {
                response: &entry.response,
                pass: MatchPass::Exact {
                    entry: index,
                    key: key.clone(),
                },
            };
        }
    }

    let tokens = normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS);
    for token in tokens {
        for (index, entry) in kb.entries().iter().enumerate() {
            let related = entry
                .keys
                .iter()
                .find(|k| k.contains(token) || token.contains(k.as_str()));
            if let Some(key) = related {
                return Match {
                    response: &entry.response,
                    pass: MatchPass::Related {
                        entry: index,
                        key: key.clone(),
                        token: token.to_string(),
                    },
                };
            }
        }
    }

    Match {
        response: kb.default_response(),
        pass: MatchPass::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{builtin, CatalogVariant, KnowledgeEntry};

    fn sample_kb() -> KnowledgeBase {
        KnowledgeBase::new(
            vec![
                KnowledgeEntry::new(&["bom dia", "olá"], "greeting"),
                KnowledgeEntry::new(&["coral", "recife"], "reef"),
                KnowledgeEntry::new(&["recife de coral"], "specific reef"),
                KnowledgeEntry::new(&["temperatura"], "heat"),
            ],
            "fallback",
        )
        .unwrap()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let kb = sample_kb();
        assert_eq!(respond(&kb, "BOM DIA, Eco"), "greeting");
        assert_eq!(respond(&kb, "OLÁ"), "greeting");
    }

    #[test]
    fn test_first_declared_entry_wins_over_longer_key() {
        let kb = sample_kb();
        // "recife de coral" is longer, but entry 1 is declared first.
        let m = find_match(&kb, "fale do recife de coral");
        assert_eq!(m.response, "reef");
        assert_eq!(
            m.pass,
            MatchPass::Exact {
                entry: 1,
                key: "coral".to_string()
            }
        );
    }

    #[test]
    fn test_key_order_within_entry() {
        let kb = sample_kb();
        let m = find_match(&kb, "recife e coral");
        assert_eq!(
            m.pass,
            MatchPass::Exact {
                entry: 1,
                key: "coral".to_string()
            }
        );
    }

    #[test]
    fn test_related_pass_token_inside_key() {
        let kb = sample_kb();
        // "temper" is not a key but is contained by "temperatura".
        let m = find_match(&kb, "temper");
        assert_eq!(m.response, "heat");
        assert!(matches!(m.pass, MatchPass::Related { entry: 3, .. }));
    }

    #[test]
    fn test_related_pass_follows_token_order() {
        let kb = sample_kb();
        // Both tokens are related to some key; the first token decides.
        let m = find_match(&kb, "tempe reci");
        assert_eq!(m.response, "heat");
        let m = find_match(&kb, "reci tempe");
        assert_eq!(m.response, "reef");
    }

    #[test]
    fn test_related_pass_skips_short_tokens() {
        let kb = sample_kb();
        // "re" is part of "recife" but shorter than three characters.
        assert_eq!(respond(&kb, "re ok"), "fallback");
    }

    #[test]
    fn test_short_token_counts_characters_not_bytes() {
        let kb = KnowledgeBase::new(vec![KnowledgeEntry::new(&["pão de açúcar"], "rio")], "d")
            .unwrap();
        // "açú" is three characters but more than three bytes.
        assert_eq!(respond(&kb, "açú"), "rio");
        // "çú" is two characters.
        assert_eq!(respond(&kb, "çú"), "d");
    }

    #[test]
    fn test_default_for_empty_and_whitespace() {
        let kb = sample_kb();
        assert_eq!(find_match(&kb, "").pass, MatchPass::Default);
        assert_eq!(respond(&kb, "   \t\n "), "fallback");
        assert_eq!(respond(&kb, "a b c"), "fallback");
    }

    #[test]
    fn test_very_long_input() {
        let kb = sample_kb();
        let input = "x".repeat(100_000);
        assert_eq!(respond(&kb, &input), "fallback");
    }

    #[test]
    fn test_respond_is_deterministic() {
        let kb = builtin(CatalogVariant::Full);
        for input in ["Olá", "me fala sobre corais", "xyz123", "economia azul"] {
            assert_eq!(respond(&kb, input), respond(&kb, input));
        }
    }

    #[test]
    fn test_empty_knowledge_base_returns_default() {
        let kb = KnowledgeBase::new(vec![], "only default").unwrap();
        assert_eq!(respond(&kb, "corais"), "only default");
    }

    #[test]
    fn test_builtin_greeting() {
        let kb = builtin(CatalogVariant::Full);
        assert!(respond(&kb, "Olá").contains("Como posso ajudar"));
        let compact = builtin(CatalogVariant::Compact);
        assert!(respond(&compact, "Olá").contains("Como posso ajudar"));
    }

    #[test]
    fn test_builtin_corals() {
        let kb = builtin(CatalogVariant::Full);
        let m = find_match(&kb, "me fala sobre corais");
        assert!(m.response.starts_with("Os corais são extremamente sensíveis"));
        assert_eq!(
            m.pass,
            MatchPass::Exact {
                entry: 8,
                key: "corais".to_string()
            }
        );
    }

    #[test]
    fn test_builtin_unknown_input() {
        let kb = builtin(CatalogVariant::Full);
        let m = find_match(&kb, "xyz123");
        assert_eq!(m.pass, MatchPass::Default);
        assert_eq!(m.response, kb.default_response());
    }
}
