//! CV syllabification.
//!
//! A single left-to-right scan:
//! - a vowel is its own syllable
//! - consonant + vowel is one syllable
//! - a word-final consonant stands alone if the script permits it there
//!   (`s`, `n`, `r`), otherwise it is dropped
//! - a consonant followed by another consonant is written with an echo of
//!   the nearest *preceding* vowel; at the start of a word, where there is
//!   none, the next following vowel is used instead
//!
//! `wanakte → wa-na-ka-te`, `ptolis → po-to-li-s`.
//!
//! The output only contains CV and V syllables plus at most one final
//! bare consonant, so re-syllabifying it returns it unchanged.

use super::orthography::is_permitted_final;
use crate::script::{is_vowel, strip_separators, SEPARATOR};

pub fn syllabify(form: &str) -> String {
    let chars: Vec<char> = strip_separators(form).chars().collect();
    let mut syllables: Vec<String> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_vowel(c) {
            syllables.push(c.to_string());
            i += 1;
            continue;
        }
        match chars.get(i + 1) {
            Some(&v) if is_vowel(v) => {
                syllables.push(format!("{c}{v}"));
                i += 2;
            }
            Some(_) => {
                if let Some(v) = echo_vowel(&chars, i) {
                    syllables.push(format!("{c}{v}"));
                }
                i += 1;
            }
            None => {
                if is_permitted_final(c) {
                    syllables.push(c.to_string());
                }
                i += 1;
            }
        }
    }

    syllables.join(&SEPARATOR.to_string())
}

/// Vowel used to write the cluster consonant at `at`.
fn echo_vowel(chars: &[char], at: usize) -> Option<char> {
    chars[..at]
        .iter()
        .rev()
        .find(|&&c| is_vowel(c))
        .or_else(|| chars[at + 1..].iter().find(|&&c| is_vowel(c)))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paradigm::orthography::apply_orthography;

    #[test]
    fn open_syllables() {
        assert_eq!(syllabify("wanaka"), "wa-na-ka");
        assert_eq!(syllabify("potinija"), "po-ti-ni-ja");
        assert_eq!(syllabify("teo"), "te-o");
    }

    #[test]
    fn bare_vowels_stand_alone() {
        assert_eq!(syllabify("eraiwo"), "e-ra-i-wo");
        assert_eq!(syllabify("a"), "a");
        assert_eq!(syllabify("oa"), "o-a");
    }

    #[test]
    fn permitted_final_consonants() {
        assert_eq!(syllabify("wanakas"), "wa-na-ka-s");
        assert_eq!(syllabify("wanakon"), "wa-na-ko-n");
        assert_eq!(syllabify("pater"), "pa-te-r");
    }

    #[test]
    fn other_final_consonants_are_dropped() {
        assert_eq!(syllabify("melit"), "me-li");
        assert_eq!(syllabify("k"), "");
    }

    // Cluster tie-break: nearest preceding vowel wins.
    #[test]
    fn medial_cluster_echoes_preceding_vowel() {
        assert_eq!(syllabify("wanakte"), "wa-na-ka-te");
        assert_eq!(syllabify("wanakpi"), "wa-na-ka-pi");
        assert_eq!(syllabify("wanaksi"), "wa-na-ka-si");
        assert_eq!(syllabify("korwa"), "ko-ro-wa");
        assert_eq!(syllabify("potnija"), "po-to-ni-ja");
    }

    #[test]
    fn preceding_vowel_wins_over_following() {
        // Both neighbours exist and differ: `i` precedes, `o` follows.
        assert_eq!(syllabify("tiktos"), "ti-ki-to-s");
    }

    #[test]
    fn triple_cluster_echoes_the_same_vowel() {
        assert_eq!(syllabify("alkstra"), "a-la-ka-sa-ta-ra");
    }

    #[test]
    fn initial_cluster_echoes_following_vowel() {
        assert_eq!(syllabify("ptolis"), "po-to-li-s");
        assert_eq!(syllabify("knosos"), "ko-no-so-s");
        assert_eq!(syllabify("stra"), "sa-ta-ra");
    }

    #[test]
    fn cluster_before_final_consonant() {
        assert_eq!(syllabify("wanaks"), "wa-na-ka-s");
        assert_eq!(syllabify("wanakt"), "wa-na-ka");
    }

    #[test]
    fn vowelless_input_yields_nothing_but_a_permitted_final() {
        assert_eq!(syllabify("pt"), "");
        assert_eq!(syllabify("ps"), "s");
    }

    #[test]
    fn separators_are_ignored_on_input() {
        assert_eq!(syllabify("wa-na-ka"), "wa-na-ka");
        assert_eq!(syllabify(""), "");
    }

    #[test]
    fn re_syllabification_is_stable() {
        let forms = [
            "wanakte", "wanaks", "ptolis", "knosos", "korwa", "alkstra", "tiktos", "eraiwon",
            "potnija", "pater", "melit", "ippos", "didonsi", "qasilewes", "a", "",
        ];
        for form in forms {
            let once = syllabify(&apply_orthography(form));
            let twice = syllabify(&apply_orthography(&once));
            assert_eq!(once, twice, "{form}");
        }
    }
}
