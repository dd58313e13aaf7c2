use crate::Inflect;

/// Irregular nouns as (singular, plural) pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Nouns whose singular and plural forms coincide.
const UNCOUNTABLE: &[&str] = &[
    "aircraft",
    "deer",
    "equipment",
    "fish",
    "information",
    "news",
    "series",
    "sheep",
    "species",
    "staff",
];

/// Leading words that form closed compounds with a table noun, as in
/// `chairwoman` or `salesperson`.
const COMPOUND_HEADS: &[&str] = &[
    "business", "chair", "congress", "country", "crafts", "fire", "fore", "grand", "lay",
    "middle", "police", "sales", "school", "spokes", "trades", "work",
];

/// Regular English noun inflection.
///
/// Covers the common suffix rules (`-y`/`-ies`, sibilant `-es`, plain `-s`)
/// plus short tables of irregular and uncountable nouns. Table nouns match
/// whole words, or the tail of a compound split by `_`, `-` or a space, or
/// after one of a few known compound heads. So `chairwoman` inflects like
/// `woman`, while `human` and `german` follow the regular rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct English;

impl English {
    /// The part of `word` before `noun`, if `word` is `noun` or a compound
    /// ending in it.
    fn compound_prefix<'a>(word: &'a str, noun: &str) -> Option<&'a str> {
        let prefix = word.strip_suffix(noun)?;
        let boundary = prefix.is_empty()
            || prefix.ends_with(['_', '-', ' '])
            || COMPOUND_HEADS.contains(&prefix);
        boundary.then_some(prefix)
    }

    fn irregular_plural(word: &str) -> Option<String> {
        IRREGULAR.iter().find_map(|(singular, plural)| {
            Self::compound_prefix(word, singular).map(|prefix| format!("{prefix}{plural}"))
        })
    }

    fn irregular_singular(word: &str) -> Option<String> {
        IRREGULAR.iter().find_map(|(singular, plural)| {
            Self::compound_prefix(word, plural).map(|prefix| format!("{prefix}{singular}"))
        })
    }

    fn is_irregular_singular(word: &str) -> bool {
        IRREGULAR
            .iter()
            .any(|(singular, _)| Self::compound_prefix(word, singular).is_some())
    }

    fn is_uncountable(word: &str) -> bool {
        UNCOUNTABLE
            .iter()
            .any(|noun| Self::compound_prefix(word, noun).is_some())
    }

    fn pluralize(singular: &str) -> String {
        if let Some(plural) = Self::irregular_plural(singular) {
            return plural;
        }

        if let Some(stem) = singular.strip_suffix('y') {
            if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
                return format!("{stem}ies");
            }
        }

        if ["s", "x", "z", "ch", "sh"]
            .iter()
            .any(|suffix| singular.ends_with(suffix))
        {
            return format!("{singular}es");
        }

        format!("{singular}s")
    }
}

impl Inflect for English {
    fn singular(&self, word: &str) -> String {
        if word.is_empty() || Self::is_uncountable(word) {
            return word.to_owned();
        }

        // Already singular forms of an irregular noun must not fall through
        // to the suffix rules ("woman" ends in neither plural form).
        if Self::is_irregular_singular(word) {
            return word.to_owned();
        }

        if let Some(singular) = Self::irregular_singular(word) {
            return singular;
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if !stem.is_empty() {
                return format!("{stem}y");
            }
        }

        for suffix in ["sses", "xes", "zes", "ches", "shes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_owned();
            }
        }

        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_owned();
        }

        match word.strip_suffix('s') {
            Some(stem) if !stem.is_empty() => stem.to_owned(),
            _ => word.to_owned(),
        }
    }

    fn plural(&self, word: &str) -> String {
        if word.is_empty() || Self::is_uncountable(word) {
            return word.to_owned();
        }

        Self::pluralize(&self.singular(word))
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_inflects_consonant_y_nouns() {
        assert_eq!(English.singular("spies"), "spy");
        assert_eq!(English.plural("spy"), "spies");
        assert_eq!(English.singular("spy"), "spy");
        assert_eq!(English.plural("spies"), "spies");
    }

    #[test]
    fn it_keeps_vowel_y_nouns_regular() {
        assert_eq!(English.plural("attorney"), "attorneys");
        assert_eq!(English.singular("attorneys"), "attorney");
    }

    #[test]
    fn it_inflects_regular_nouns() {
        for (singular, plural) in [
            ("spymaster", "spymasters"),
            ("mole", "moles"),
            ("informant", "informants"),
            ("politician", "politicians"),
            ("citizen", "citizens"),
            ("base", "bases"),
            ("superuser", "superusers"),
        ] {
            assert_eq!(English.singular(plural), singular);
            assert_eq!(English.singular(singular), singular);
            assert_eq!(English.plural(singular), plural);
            assert_eq!(English.plural(plural), plural);
        }
    }

    #[test]
    fn it_inflects_sibilant_nouns() {
        assert_eq!(English.plural("boss"), "bosses");
        assert_eq!(English.singular("bosses"), "boss");
        assert_eq!(English.plural("coach"), "coaches");
        assert_eq!(English.singular("coaches"), "coach");
        assert_eq!(English.plural("box"), "boxes");
    }

    #[test]
    fn it_inflects_irregular_nouns() {
        assert_eq!(English.plural("chairwoman"), "chairwomen");
        assert_eq!(English.singular("chairwomen"), "chairwoman");
        assert_eq!(English.plural("people"), "people");
        assert_eq!(English.singular("people"), "person");
        assert_eq!(English.singular("woman"), "woman");
    }

    #[test]
    fn it_matches_irregular_nouns_only_as_whole_words() {
        assert_eq!(English.forms("humans"), ("human".into(), "humans".into()));
        assert_eq!(English.forms("human"), ("human".into(), "humans".into()));
        assert_eq!(English.forms("germans"), ("german".into(), "germans".into()));
        assert_eq!(English.forms("shaman"), ("shaman".into(), "shamans".into()));
    }

    #[test]
    fn it_inflects_irregular_compounds() {
        assert_eq!(English.plural("salesperson"), "salespeople");
        assert_eq!(English.singular("field_men"), "field_man");
        assert_eq!(English.plural("line-man"), "line-men");
        assert_eq!(English.forms("persons"), ("person".into(), "people".into()));
    }

    #[test]
    fn it_leaves_uncountable_nouns_alone() {
        assert_eq!(English.singular("staff"), "staff");
        assert_eq!(English.plural("staff"), "staff");
        assert_eq!(English.forms("sheep"), ("sheep".into(), "sheep".into()));
        assert_eq!(English.plural("support_staff"), "support_staff");
    }

    #[test]
    fn it_passes_empty_input_through() {
        assert_eq!(English.forms(""), (String::new(), String::new()));
    }
}
