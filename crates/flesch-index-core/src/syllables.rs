//! Heuristic syllable estimation.
//!
//! A syllable is counted for a vowel at the start of a word and for every
//! consonant-to-vowel transition after that. A lone `e` closing a word after a
//! consonant is treated as silent. Words of three characters or fewer are one
//! syllable, and no word ever counts as zero.
//!
//! This is deliberately not a pronunciation dictionary: diphthongs, silent
//! letters and irregular spellings will be miscounted.

use crate::classify::CharClass;
use crate::tokens::{ClassifiedChar, tokenize};

/// Words at or below this length are always one syllable.
const SHORT_WORD_MAX: usize = 3;

/// Estimate the syllables in a word's characters.
///
/// Callers pass the letters of a single word; the result is always at least 1.
pub fn count_syllables(word: &[ClassifiedChar]) -> usize {
    if word.len() <= SHORT_WORD_MAX {
        return 1;
    }

    let mut count = usize::from(word[0].class == CharClass::Vowel);
    let last = word.len() - 1;

    for (i, pair) in word.windows(2).enumerate() {
        let (prev, cur) = (pair[0], pair[1]);
        if cur.class != CharClass::Vowel || prev.class != CharClass::Consonant {
            continue;
        }
        if i + 1 == last && is_silent_e(cur, prev) {
            continue;
        }
        count += 1;
    }

    count.max(1)
}

/// Estimate syllables for a word given as a string.
pub fn count_syllables_str(word: &str) -> usize {
    count_syllables(&tokenize(word))
}

/// A closing `e` directly after a consonant.
fn is_silent_e(last: ClassifiedChar, before: ClassifiedChar) -> bool {
    matches!(last.value, 'e' | 'E') && before.class == CharClass::Consonant
}
