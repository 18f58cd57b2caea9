// Co-occurrence heuristic — topic anchor plus negative-sentiment word.
//
// A text that mentions the topic AND carries a generic negative word is
// suspicious even when no curated phrase matches. Both checks are literal
// substring containment, not fuzzy: this stage exists to catch hostile
// sentiment the deny-list authors did not anticipate, and fuzziness here
// would cost too many false positives.

use crate::lexicon::TermSet;

/// Return the first negative term (in list order) present in `text`,
/// provided at least one anchor term is also present. Pure function.
pub fn check<'a>(text: &str, anchors: &TermSet, negatives: &'a TermSet) -> Option<&'a str> {
    let anchored = anchors.terms().iter().any(|a| text.contains(a.as_str()));
    if !anchored {
        return None;
    }
    negatives
        .terms()
        .iter()
        .find(|n| text.contains(n.as_str()))
        .map(|n| n.as_str())
}
