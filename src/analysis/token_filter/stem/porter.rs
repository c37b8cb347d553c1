//! Porter stemming algorithm implementation.
//!
//! This is the original algorithm published by M.F. Porter in 1980 ("An
//! algorithm for suffix stripping"), following the reference C
//! implementation, including its `bli`/`logi` departures in step 2.
//!
//! The algorithm works on a buffer of ASCII bytes. `j` marks the end of the
//! stem once a suffix has been matched; the measure `m` counts the
//! vowel-consonant sequences of `word[..=j]`.
//!
//! Words containing non-ASCII characters are returned unchanged.
//!
//! # Examples
//!
//! ```
//! use newsrank::analysis::token_filter::stem::Stemmer;
//! use newsrank::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

/// Porter stemming algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        if word.len() <= 2 || !word.is_ascii() {
            return word.to_string();
        }

        let mut buffer = StemBuffer::new(word.to_ascii_lowercase().into_bytes());
        buffer.step1ab();
        buffer.step1c();
        buffer.step2();
        buffer.step3();
        buffer.step4();
        buffer.step5();
        buffer.into_string()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Suffix rewrites of step 2. The first matching suffix wins, even when
/// its measure condition then fails.
const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Working state of one stemming run.
struct StemBuffer {
    b: Vec<u8>,
    /// End of the stem (inclusive) set by the last successful `ends`; may be -1.
    j: isize,
}

impl StemBuffer {
    fn new(b: Vec<u8>) -> Self {
        let j = b.len() as isize - 1;
        StemBuffer { b, j }
    }

    fn into_string(self) -> String {
        // The buffer only ever holds the ASCII bytes it started with.
        self.b.into_iter().map(char::from).collect()
    }

    /// Index of the last byte.
    fn k(&self) -> isize {
        self.b.len() as isize - 1
    }

    fn last(&self) -> u8 {
        self.b.last().copied().unwrap_or_default()
    }

    fn at(&self, i: isize) -> u8 {
        self.b[i as usize]
    }

    /// Whether the byte at `i` is a consonant.
    fn cons(&self, i: isize) -> bool {
        match self.at(i) {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Number of VC sequences in `b[..=j]`.
    fn measure(&self) -> usize {
        let mut n = 0;
        let mut i = 0;
        loop {
            if i > self.j {
                return n;
            }
            if !self.cons(i) {
                break;
            }
            i += 1;
        }
        i += 1;
        loop {
            loop {
                if i > self.j {
                    return n;
                }
                if self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
            n += 1;
            loop {
                if i > self.j {
                    return n;
                }
                if !self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..=self.j).any(|i| !self.cons(i))
    }

    fn double_consonant(&self, i: isize) -> bool {
        i >= 1 && self.at(i) == self.at(i - 1) && self.cons(i)
    }

    /// consonant-vowel-consonant ending at `i`, where the last consonant is not w, x or y.
    fn cvc(&self, i: isize) -> bool {
        if i < 2 || !self.cons(i) || self.cons(i - 1) || !self.cons(i - 2) {
            return false;
        }
        !matches!(self.at(i), b'w' | b'x' | b'y')
    }

    /// Check the suffix; on a match `j` moves to the end of the stem.
    fn ends(&mut self, suffix: &str) -> bool {
        let len = suffix.len() as isize;
        if len > self.k() + 1 {
            return false;
        }
        let start = (self.k() + 1 - len) as usize;
        if &self.b[start..] != suffix.as_bytes() {
            return false;
        }
        self.j = self.k() - len;
        true
    }

    /// Replace everything after `j` with `replacement`.
    fn set_to(&mut self, replacement: &str) {
        self.b.truncate((self.j + 1) as usize);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.measure() > 0 {
            self.set_to(replacement);
        }
    }

    fn apply_first(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    /// Plurals and -ed / -ing.
    fn step1ab(&mut self) {
        if self.last() == b's' {
            if self.ends("sses") {
                self.b.truncate(self.b.len() - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.at(self.k() - 1) != b's' {
                self.b.pop();
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                self.b.pop();
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.b.truncate((self.j + 1) as usize);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.k()) {
                if !matches!(self.last(), b'l' | b's' | b'z') {
                    self.b.pop();
                }
            } else if self.measure() == 1 && self.cvc(self.k()) {
                self.set_to("e");
            }
        }
    }

    /// Terminal y to i when there is another vowel in the stem.
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let k = self.k() as usize;
            self.b[k] = b'i';
        }
    }

    fn step2(&mut self) {
        self.apply_first(STEP2_RULES);
    }

    fn step3(&mut self) {
        self.apply_first(STEP3_RULES);
    }

    fn step4(&mut self) {
        for suffix in STEP4_SUFFIXES {
            if !self.ends(suffix) {
                continue;
            }
            if *suffix == "ion" && !(self.j >= 0 && matches!(self.at(self.j), b's' | b't')) {
                continue;
            }
            if self.measure() > 1 {
                self.b.truncate((self.j + 1) as usize);
            }
            return;
        }
    }

    /// Final -e and -ll.
    fn step5(&mut self) {
        self.j = self.k();
        if self.last() == b'e' {
            let m = self.measure();
            if m > 1 || (m == 1 && !self.cvc(self.k() - 1)) {
                self.b.pop();
            }
        }

        self.j = self.k();
        if self.last() == b'l' && self.double_consonant(self.k()) && self.measure() > 1 {
            self.b.pop();
        }
    }
}
