//! Tokenizer: code-point classification and word segmentation.
//!
//! Tablet text mixes syllabograms, commodity ideograms, numerals and
//! several divider glyphs. Segmentation follows scribal practice:
//! 1. **Syllabograms** accumulate into the current word
//! 2. **Dividers / line breaks** close the current word
//! 3. **Logograms** close the current word and stand as their own word
//! 4. **Digits** attach to a preceding logogram word (quantities follow
//!    commodity ideograms), otherwise start a numeral word

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Linear B Syllabary block.
pub const SYLLABARY_RANGE: (u32, u32) = (0x10000, 0x1007F);
/// Linear B Ideograms block.
pub const IDEOGRAM_RANGE: (u32, u32) = (0x10080, 0x100FA);
/// Aegean Numbers block, numerals only.
pub const AEGEAN_NUMERAL_RANGE: (u32, u32) = (0x10107, 0x10133);

/// Raised word-separator dot (U+2E31), common on tablets.
pub const WORD_SEPARATOR_DOT: char = '\u{2E31}';
/// Aegean word separator line (U+10100).
pub const AEGEAN_SEPARATOR_LINE: char = '\u{10100}';
/// Aegean word separator dot (U+10101).
pub const AEGEAN_SEPARATOR_DOT: char = '\u{10101}';

static RE_UNICODE_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{00A0}\u{2000}-\u{200B}\u{202F}\u{205F}\u{3000}]").unwrap());

static RE_SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Byte-level source span of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Classification of a single code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Syllabogram,
    Logogram,
    WordDivider,
    LineBreak,
    Digit,
    Unknown,
}

/// A classified character with its position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub character: char,
    pub kind: TokenKind,
    pub span: Span,
}

/// One lexical unit: an ordered run of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Word {
    tokens: Vec<Token>,
}

impl Word {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The word exactly as written, all token kinds included.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.character).collect()
    }

    /// Only the syllabogram characters, in order.
    pub fn syllabograms(&self) -> impl Iterator<Item = char> + '_ {
        self.tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Syllabogram)
            .map(|t| t.character)
    }

    pub fn syllable_count(&self) -> usize {
        self.syllabograms().count()
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|t| t.kind)
    }
}

/// Stateless Linear B tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Classify a single code point.
    pub fn classify(c: char) -> TokenKind {
        let code = c as u32;
        if (SYLLABARY_RANGE.0..=SYLLABARY_RANGE.1).contains(&code) {
            TokenKind::Syllabogram
        } else if (IDEOGRAM_RANGE.0..=IDEOGRAM_RANGE.1).contains(&code) {
            TokenKind::Logogram
        } else if c == '\n' {
            TokenKind::LineBreak
        } else if matches!(
            c,
            WORD_SEPARATOR_DOT | AEGEAN_SEPARATOR_LINE | AEGEAN_SEPARATOR_DOT | ' ' | '\t'
        ) {
            TokenKind::WordDivider
        } else if c.is_ascii_digit()
            || (AEGEAN_NUMERAL_RANGE.0..=AEGEAN_NUMERAL_RANGE.1).contains(&code)
        {
            TokenKind::Digit
        } else {
            TokenKind::Unknown
        }
    }

    /// Collapse every Unicode space variant to a single ASCII space and trim.
    pub fn normalize(&self, text: &str) -> String {
        let spaced = RE_UNICODE_SPACES.replace_all(text, " ");
        let collapsed = RE_SPACE_RUNS.replace_all(&spaced, " ");
        collapsed.trim().to_string()
    }

    /// Classify every code point of `text`.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        text.char_indices()
            .map(|(start, character)| Token {
                character,
                kind: Self::classify(character),
                span: Span {
                    start,
                    end: start + character.len_utf8(),
                },
            })
            .collect()
    }

    /// Segment `text` into words.
    ///
    /// Unknown characters are dropped. Only a word ending in a logogram
    /// takes a digit, so `𐂀12` splits into `𐂀1` and `2`.
    pub fn segment_words(&self, text: &str) -> Vec<Word> {
        let mut words: Vec<Word> = Vec::new();
        let mut current: Vec<Token> = Vec::new();

        for token in self.tokenize(text) {
            match token.kind {
                TokenKind::Syllabogram => current.push(token),
                TokenKind::WordDivider | TokenKind::LineBreak => {
                    close_word(&mut current, &mut words);
                }
                TokenKind::Logogram => {
                    close_word(&mut current, &mut words);
                    words.push(Word::new(vec![token]));
                }
                TokenKind::Digit => {
                    close_word(&mut current, &mut words);
                    let attach =
                        words.last().and_then(Word::last_kind) == Some(TokenKind::Logogram);
                    match words.last_mut() {
                        Some(word) if attach => word.tokens.push(token),
                        _ => words.push(Word::new(vec![token])),
                    }
                }
                TokenKind::Unknown => {}
            }
        }
        close_word(&mut current, &mut words);

        words
    }

    /// Each word's syllabogram characters, dropping words without any.
    pub fn word_strings(&self, text: &str) -> Vec<String> {
        self.segment_words(text)
            .iter()
            .map(|w| w.syllabograms().collect::<String>())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn close_word(current: &mut Vec<Token>, words: &mut Vec<Word>) {
    if !current.is_empty() {
        words.push(Word::new(std::mem::take(current)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 𐀷𐀙𐀏 = wa-na-ka, 𐀡𐀴𐀛𐀊 = po-ti-ni-ja, 𐂀 = an ideogram.
    const WANAKA: &str = "\u{10037}\u{10019}\u{1000F}";
    const POTINIJA: &str = "\u{10021}\u{10034}\u{1001B}\u{1000A}";
    const IDEOGRAM: char = '\u{10080}';

    fn kinds(words: &[Word]) -> Vec<Vec<TokenKind>> {
        words
            .iter()
            .map(|w| w.tokens().iter().map(|t| t.kind).collect())
            .collect()
    }

    #[test]
    fn classifies_each_range() {
        assert_eq!(Tokenizer::classify('\u{10000}'), TokenKind::Syllabogram);
        assert_eq!(Tokenizer::classify('\u{1007F}'), TokenKind::Syllabogram);
        assert_eq!(Tokenizer::classify('\u{10080}'), TokenKind::Logogram);
        assert_eq!(Tokenizer::classify('\u{100FA}'), TokenKind::Logogram);
        assert_eq!(Tokenizer::classify(WORD_SEPARATOR_DOT), TokenKind::WordDivider);
        assert_eq!(Tokenizer::classify(AEGEAN_SEPARATOR_LINE), TokenKind::WordDivider);
        assert_eq!(Tokenizer::classify(' '), TokenKind::WordDivider);
        assert_eq!(Tokenizer::classify('\t'), TokenKind::WordDivider);
        assert_eq!(Tokenizer::classify('\n'), TokenKind::LineBreak);
        assert_eq!(Tokenizer::classify('7'), TokenKind::Digit);
        assert_eq!(Tokenizer::classify('\u{10107}'), TokenKind::Digit);
        assert_eq!(Tokenizer::classify('x'), TokenKind::Unknown);
    }

    #[test]
    fn tokens_carry_byte_spans() {
        let tokens = Tokenizer::new().tokenize("a\u{10037}");
        assert_eq!(tokens[0].span, Span { start: 0, end: 1 });
        assert_eq!(tokens[1].span, Span { start: 1, end: 5 });
    }

    #[test]
    fn normalize_collapses_unicode_spaces() {
        let t = Tokenizer::new();
        assert_eq!(t.normalize("\u{00A0}a\u{2003}\u{3000} b  "), "a b");
        assert_eq!(t.normalize(""), "");
    }

    #[test]
    fn single_word() {
        let words = Tokenizer::new().segment_words(WANAKA);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].syllable_count(), 3);
        assert_eq!(words[0].text(), WANAKA);
    }

    #[test]
    fn dividers_split_words() {
        let t = Tokenizer::new();
        for divider in [" ", "\u{2E31}", "\u{10100}", "\n", "\t"] {
            let text = format!("{WANAKA}{divider}{POTINIJA}");
            assert_eq!(t.word_strings(&text), vec![WANAKA, POTINIJA], "divider {divider:?}");
        }
    }

    #[test]
    fn repeated_dividers_produce_no_empty_words() {
        let text = format!("  {WANAKA} \u{2E31}\n {POTINIJA}\n");
        assert_eq!(Tokenizer::new().segment_words(&text).len(), 2);
    }

    #[test]
    fn logogram_closes_word_and_stands_alone() {
        let text = format!("{WANAKA}{IDEOGRAM}{POTINIJA}");
        let words = Tokenizer::new().segment_words(&text);
        assert_eq!(
            kinds(&words),
            vec![
                vec![TokenKind::Syllabogram; 3],
                vec![TokenKind::Logogram],
                vec![TokenKind::Syllabogram; 4],
            ]
        );
    }

    #[test]
    fn digit_attaches_to_logogram() {
        let text = format!("{WANAKA} {IDEOGRAM} 5");
        let words = Tokenizer::new().segment_words(&text);
        assert_eq!(words.len(), 2);
        assert_eq!(
            kinds(&words)[1],
            vec![TokenKind::Logogram, TokenKind::Digit]
        );
    }

    #[test]
    fn only_the_first_digit_joins_a_logogram() {
        let text = format!("{IDEOGRAM}12");
        let words = Tokenizer::new().segment_words(&text);
        let texts: Vec<_> = words.iter().map(Word::text).collect();
        assert_eq!(texts, [format!("{IDEOGRAM}1"), "2".to_string()]);
        assert_eq!(kinds(&words)[1], vec![TokenKind::Digit]);

        let spaced = format!("{IDEOGRAM} 1 2");
        assert_eq!(Tokenizer::new().segment_words(&spaced).len(), 2);
    }

    #[test]
    fn numeric_symbols_outside_the_numeral_ranges_are_unknown() {
        for c in ['\u{00BD}', '\u{216B}', '\u{00B2}', '\u{0663}'] {
            assert_eq!(Tokenizer::classify(c), TokenKind::Unknown, "{c:?}");
        }
        assert_eq!(Tokenizer::classify('\u{10133}'), TokenKind::Digit);
        assert_eq!(Tokenizer::classify('\u{10134}'), TokenKind::Unknown);
    }

    #[test]
    fn digit_after_syllabic_word_starts_new_word() {
        let text = format!("{WANAKA}3");
        let words = Tokenizer::new().segment_words(&text);
        assert_eq!(
            kinds(&words),
            vec![vec![TokenKind::Syllabogram; 3], vec![TokenKind::Digit]]
        );
    }

    #[test]
    fn word_strings_drop_non_syllabic_words() {
        let text = format!("{IDEOGRAM} 5 {WANAKA}");
        assert_eq!(Tokenizer::new().word_strings(&text), vec![WANAKA]);
    }

    #[test]
    fn unknown_characters_are_ignored() {
        let text = format!("{WANAKA}?!{POTINIJA}");
        let words = Tokenizer::new().segment_words(&text);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].syllable_count(), 7);
    }

    #[test]
    fn empty_input_yields_no_words() {
        let t = Tokenizer::new();
        assert!(t.segment_words("").is_empty());
        assert!(t.word_strings("   ").is_empty());
    }
}
