// Fuzzy phrase matcher — first-over-threshold scan of an ordered list.
//
// The similarity is a partial ratio: the shorter of phrase and text is
// aligned against every equal-length character window of the longer, and
// the best window's indel similarity wins, scaled to 0-100. A phrase
// embedded inside a longer sentence, a fragment of a phrase typed on its
// own, or minor spelling/transliteration noise all still score high.
// The first phrase over the threshold wins, not the best-scoring one —
// list order is the tie-break, which makes phrase ordering an authoring
// concern.

use rapidfuzz::distance::indel;

use crate::lexicon::PhraseList;

/// A phrase that cleared the similarity threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch<'a> {
    pub phrase: &'a str,
    /// Partial-ratio similarity rounded to an integer, 0-100.
    pub similarity: u8,
}

/// Scan `list` in order and return the first phrase whose similarity
/// against `text` strictly exceeds `threshold`.
///
/// `text` must already be normalized (trimmed, Unicode-lowercased);
/// list phrases are normalized at load time. Pure function.
pub fn best_match<'a>(text: &str, list: &'a PhraseList, threshold: u8) -> Option<PhraseMatch<'a>> {
    let text: Vec<char> = text.chars().collect();
    for phrase in list.phrases() {
        let similarity = partial_ratio(phrase, &text);
        if similarity > f64::from(threshold) {
            return Some(PhraseMatch {
                phrase,
                similarity: similarity.round().min(100.0) as u8,
            });
        }
    }
    None
}

/// Substring-tolerant similarity, 0-100: the shorter sequence's best
/// indel similarity over all equal-length character windows of the
/// longer one. Symmetric in direction, so a fragment of a phrase scores
/// as highly as a phrase buried in a sentence.
fn partial_ratio(phrase: &str, text: &[char]) -> f64 {
    let phrase: Vec<char> = phrase.chars().collect();
    if phrase.is_empty() || text.is_empty() {
        return 0.0;
    }
    let (needle, haystack) = if phrase.len() <= text.len() {
        (phrase.as_slice(), text)
    } else {
        (text, phrase.as_slice())
    };

    let mut best: f64 = 0.0;
    for window in haystack.windows(needle.len()) {
        let sim = indel::normalized_similarity(needle.iter().copied(), window.iter().copied());
        if sim > best {
            best = sim;
            if best >= 1.0 {
                break;
            }
        }
    }
    best * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{PhraseGroup, PhraseList};

    fn list(phrases: &[&str]) -> PhraseList {
        PhraseList::from_groups(&[PhraseGroup {
            script: "test".to_string(),
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }])
    }

    #[test]
    fn exact_phrase_matches_at_full_similarity() {
        let list = list(&["jai hind"]);
        let m = best_match("jai hind", &list, 85).unwrap();
        assert_eq!(m.phrase, "jai hind");
        assert_eq!(m.similarity, 100);
    }

    #[test]
    fn phrase_embedded_in_longer_sentence_still_matches() {
        let list = list(&["destroy india"]);
        let m = best_match("we will destroy india tomorrow", &list, 80).unwrap();
        assert_eq!(m.phrase, "destroy india");
        assert_eq!(m.similarity, 100);
    }

    #[test]
    fn minor_spelling_variation_still_matches() {
        let list = list(&["bharat murdabad"]);
        // One substitution inside a 15-char phrase stays well above 80
        let m = best_match("bharat murdabad", &list, 80).unwrap();
        assert_eq!(m.similarity, 100);
        let m = best_match("bharat murdabed today", &list, 80).unwrap();
        assert_eq!(m.phrase, "bharat murdabad");
        assert!(m.similarity >= 85, "got {}", m.similarity);
        assert!(m.similarity < 100);
    }

    #[test]
    fn unrelated_text_does_not_match() {
        let list = list(&["destroy india"]);
        assert!(best_match("the weather is nice today", &list, 80).is_none());
    }

    #[test]
    fn first_phrase_over_threshold_wins_not_best_score() {
        // Both phrases clear the threshold against this text; the earlier
        // entry must win even though the later one scores higher.
        let list = list(&["india must fall", "india must fall apart now"]);
        let m = best_match("india must fall apart now", &list, 80).unwrap();
        assert_eq!(m.phrase, "india must fall");
    }

    #[test]
    fn threshold_is_strictly_exceeded() {
        let list = list(&["abcd"]);
        // Identical text scores exactly 100, which exceeds 99 but not 100
        assert!(best_match("abcd", &list, 99).is_some());
        assert!(best_match("abcd", &list, 100).is_none());
    }

    #[test]
    fn shorter_text_slides_over_the_phrase() {
        // The truncated text is an exact window of the longer phrase,
        // so the slide finds a perfect alignment
        let list = list(&["bharat mata ki jai"]);
        let m = best_match("bharat mata ki ja", &list, 85).unwrap();
        assert_eq!(m.phrase, "bharat mata ki jai");
        assert_eq!(m.similarity, 100);
    }

    #[test]
    fn fragment_of_a_phrase_scores_full_similarity() {
        let list = list(&["jai hind"]);
        let m = best_match("jai", &list, 85).unwrap();
        assert_eq!(m.phrase, "jai hind");
        assert_eq!(m.similarity, 100);
    }

    #[test]
    fn devanagari_phrase_matches() {
        let list = list(&["भारत मुर्दाबाद"]);
        let m = best_match("कल भारत मुर्दाबाद लिखा था", &list, 80).unwrap();
        assert_eq!(m.phrase, "भारत मुर्दाबाद");
    }

    #[test]
    fn empty_text_never_matches() {
        let list = list(&["destroy india"]);
        assert!(best_match("", &list, 0).is_none());
    }
}
