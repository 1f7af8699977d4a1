use asset_catalog::Asset;
use nucleo_matcher::{pattern::Pattern, Matcher, Utf32String};

/// Fuzzy search over catalogue assets using nucleo-matcher.
///
/// A candidate is matched against four haystacks: its name, its tags joined
/// into one string, its groups joined into one string, and its id; the best
/// of the four is its score.
pub struct FuzzySearch {
    matcher: Matcher,
}

impl FuzzySearch {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Rank `candidates` against `query`, best match first. Candidates
    /// matching none of their haystacks are dropped; equal scores keep the
    /// caller's order (the sort is stable), so ties preserve the filter
    /// stage's ordering.
    pub fn rank<'a>(&mut self, query: &str, candidates: &[&'a Asset]) -> Vec<(&'a Asset, u32)> {
        let pattern = Pattern::parse(
            query,
            nucleo_matcher::pattern::CaseMatching::Smart,
            nucleo_matcher::pattern::Normalization::Smart,
        );

        let mut scored: Vec<(usize, u32)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(idx, asset)| Some((idx, self.score(&pattern, asset)?)))
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored
            .into_iter()
            .map(|(idx, score)| (candidates[idx], score))
            .collect()
    }

    /// Best score across the four haystacks, `None` if nothing matches
    fn score(&mut self, pattern: &Pattern, asset: &Asset) -> Option<u32> {
        let name = Utf32String::from(asset.name.as_str());
        let tags = Utf32String::from(asset.tags.join(","));
        let groups = Utf32String::from(asset.groups.join(","));
        let id = Utf32String::from(asset.id.as_str());

        [name, tags, groups, id]
            .iter()
            .filter_map(|haystack| pattern.score(haystack.slice(..), &mut self.matcher))
            .max()
    }
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_catalog::AssetType;

    fn asset(id: &str, name: &str, tags: &[&str], groups: &[&str]) -> Asset {
        Asset {
            id: id.to_string(),
            kind: AssetType::Fill,
            name: name.to_string(),
            value: "#000000".to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            groups: groups.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_name_match_ranks_first() {
        let mut fuzzy = FuzzySearch::new();
        let a = asset("fill-0", "Crimson", &[], &[]);
        let b = asset("fill-1", "Sky Blue", &[], &[]);
        let candidates = vec![&a, &b];

        let results = fuzzy.rank("crimson", &candidates);
        assert!(!results.is_empty());
        assert_eq!(results[0].0.id, "fill-0");
    }

    #[test]
    fn test_matches_joined_tags_and_id() {
        let mut fuzzy = FuzzySearch::new();
        let a = asset("fill-0", "Ink", &["brand", "primary"], &[]);
        let b = asset("gradient-3", "Dawn", &[], &[]);
        let candidates = vec![&a, &b];

        let by_tag = fuzzy.rank("brand", &candidates);
        assert_eq!(by_tag[0].0.id, "fill-0");

        let by_id = fuzzy.rank("gradient-3", &candidates);
        assert_eq!(by_id[0].0.id, "gradient-3");
    }

    #[test]
    fn test_typo_tolerance() {
        let mut fuzzy = FuzzySearch::new();
        let a = asset("fill-0", "Turquoise", &[], &[]);
        let candidates = vec![&a];

        // dropped letter still matches
        let results = fuzzy.rank("turquise", &candidates);
        assert!(!results.is_empty());
    }

    #[test]
    fn test_no_match_yields_empty() {
        let mut fuzzy = FuzzySearch::new();
        let a = asset("fill-0", "Ink", &["dark"], &["base"]);
        let candidates = vec![&a];

        assert!(fuzzy.rank("zzzzqqqq", &candidates).is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut fuzzy = FuzzySearch::new();
        let a = asset("fill-0", "Mist", &[], &[]);
        let b = asset("fill-1", "Mist", &[], &[]);
        let candidates = vec![&a, &b];

        let results = fuzzy.rank("mist", &candidates);
        let ids: Vec<&str> = results.iter().map(|(asset, _)| asset.id.as_str()).collect();
        assert_eq!(ids, vec!["fill-0", "fill-1"]);
    }
}
