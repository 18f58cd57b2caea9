// Compiled-in default lists.
//
// These are the curated multilingual lists the cascade was originally
// tuned against: affirmational phrases (allow), destructive/hostile
// phrases including transliteration variants (deny), topic anchor terms
// across scripts, and generic negative-sentiment words.
//
// Deployments with different false-positive tolerance should ship their
// own lists via EMBER_LEXICON_DIR rather than editing these.

use super::PhraseGroup;

fn group(script: &str, phrases: &[&str]) -> PhraseGroup {
    PhraseGroup {
        script: script.to_string(),
        phrases: phrases.iter().map(|p| p.to_string()).collect(),
    }
}

/// Affirmational phrases that short-circuit to SAFE.
pub fn allow_groups() -> Vec<PhraseGroup> {
    vec![
        group("urdu", &["بھارت زندہ باد"]),
        group("hindi", &["जय हिन्द", "भारत महान है", "जय भारत"]),
        group(
            "english",
            &[
                "long live india",
                "jai hind",
                "vande mataram",
                "bharat mata ki jai",
            ],
        ),
    ]
}

/// Destructive/hostile phrases that short-circuit to FLAGGED.
pub fn deny_groups() -> Vec<PhraseGroup> {
    vec![
        group(
            "hindi",
            &[
                "भारत खत्म",
                "भारत का नाश",
                "भारत मुर्दाबाद",
                "भारत मिटा दो",
                "भारत को जला दो",
                "भारत को तोड़ दो",
                "भारत का विनाश",
                "भारत का अंत",
                "भारत खत्म हो",
                "भारत खत्म होगा",
                "भारत को खत्म करो",
                "भारत बर्बाद",
                "हिंदुस्तान खत्म",
                "हिंदुस्तान मुर्दाबाद",
                "हिंदुस्तान मिटा दो",
            ],
        ),
        group(
            "english",
            &[
                "destroy india",
                "down with india",
                "death to india",
                "wipe out india",
                "kill india",
                "burn india",
                "remove india",
                "end india",
                "india must die",
                "india should perish",
                "india no more",
                "india must fall",
            ],
        ),
        group(
            "bengali",
            &[
                "ভারত ধ্বংস",
                "ভারতকে মুছে ফেল",
                "ভারত শেষ করো",
                "ভারতকে জ্বালাও",
                "ভারত নিপাত যাক",
                "ভারতকে ভেঙে দাও",
            ],
        ),
        group(
            "urdu",
            &[
                "بھارت ختم",
                "بھارت مردہ باد",
                "بھارت کو مٹا دو",
                "بھارت کو جلا دو",
                "بھارت کو توڑ دو",
                "بھارت نیست و نابود ہو",
            ],
        ),
        group(
            "transliteration",
            &[
                "bharat khatm",
                "bharat khatam",
                "bharat murdabad",
                "bharath murdabad",
                "indya murdabad",
                "india murdabaad",
                "indya khatm",
                "bharat khatm hoga",
                "bharat khatam karo",
                "bharat nasht",
                "bharat barbaad",
                "bharat ko khatam karo",
                "hindustan murdabad",
                "hindustan khatm",
            ],
        ),
    ]
}

/// Topic anchor terms for the co-occurrence stage — the same topic word
/// in each supported script.
pub fn anchor_groups() -> Vec<PhraseGroup> {
    vec![
        group("english", &["india"]),
        group("hindi", &["भारत"]),
        group("bengali", &["ভারত"]),
    ]
}

/// Generic negative-sentiment words for the co-occurrence stage.
pub fn negative_groups() -> Vec<PhraseGroup> {
    vec![
        group(
            "english",
            &[
                "bad", "worst", "evil", "dirty", "useless", "corrupt", "stupid",
            ],
        ),
        group("hindi", &["निकृष्ट", "बुरा", "घटिया", "नालायक"]),
        group("bengali", &["খারাপ", "নষ্ট", "অপদার্থ"]),
    ]
}
