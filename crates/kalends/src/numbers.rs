//! Spelled-out English numbers to digits.
//!
//! Runs over already-split, lowercased words and replaces each maximal number
//! phrase with its decimal value: "twenty two" → "22", "third" → "3",
//! "two hundred and fifth" → "205". Spoken years ("nineteen ninety two",
//! "twenty twenty") are read as two-digit pairs.
//!
//! An ordinal word always ends its phrase. "second" is read as the time unit
//! when it follows a count ("a", "two", "eleven", "5") or "per", "every" or
//! "each".

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Unit,
    Teen,
    Tens,
    Hundred,
    Scale,
}

#[derive(Debug, Clone, Copy)]
struct NumberWord {
    kind: Kind,
    value: u64,
    ordinal: bool,
}

fn lookup(word: &str) -> Option<NumberWord> {
    let (kind, value, ordinal) = match word {
        "zero" => (Kind::Unit, 0, false),
        "one" => (Kind::Unit, 1, false),
        "two" => (Kind::Unit, 2, false),
        "three" => (Kind::Unit, 3, false),
        "four" => (Kind::Unit, 4, false),
        "five" => (Kind::Unit, 5, false),
        "six" => (Kind::Unit, 6, false),
        "seven" => (Kind::Unit, 7, false),
        "eight" => (Kind::Unit, 8, false),
        "nine" => (Kind::Unit, 9, false),
        "first" => (Kind::Unit, 1, true),
        "second" => (Kind::Unit, 2, true),
        "third" => (Kind::Unit, 3, true),
        "fourth" => (Kind::Unit, 4, true),
        "fifth" => (Kind::Unit, 5, true),
        "sixth" => (Kind::Unit, 6, true),
        "seventh" => (Kind::Unit, 7, true),
        "eighth" => (Kind::Unit, 8, true),
        "ninth" => (Kind::Unit, 9, true),
        "ten" => (Kind::Teen, 10, false),
        "eleven" => (Kind::Teen, 11, false),
        "twelve" => (Kind::Teen, 12, false),
        "thirteen" => (Kind::Teen, 13, false),
        "fourteen" => (Kind::Teen, 14, false),
        "fifteen" => (Kind::Teen, 15, false),
        "sixteen" => (Kind::Teen, 16, false),
        "seventeen" => (Kind::Teen, 17, false),
        "eighteen" => (Kind::Teen, 18, false),
        "nineteen" => (Kind::Teen, 19, false),
        "tenth" => (Kind::Teen, 10, true),
        "eleventh" => (Kind::Teen, 11, true),
        "twelfth" => (Kind::Teen, 12, true),
        "thirteenth" => (Kind::Teen, 13, true),
        "fourteenth" => (Kind::Teen, 14, true),
        "fifteenth" => (Kind::Teen, 15, true),
        "sixteenth" => (Kind::Teen, 16, true),
        "seventeenth" => (Kind::Teen, 17, true),
        "eighteenth" => (Kind::Teen, 18, true),
        "nineteenth" => (Kind::Teen, 19, true),
        "twenty" => (Kind::Tens, 20, false),
        "thirty" => (Kind::Tens, 30, false),
        "forty" => (Kind::Tens, 40, false),
        "fifty" => (Kind::Tens, 50, false),
        "sixty" => (Kind::Tens, 60, false),
        "seventy" => (Kind::Tens, 70, false),
        "eighty" => (Kind::Tens, 80, false),
        "ninety" => (Kind::Tens, 90, false),
        "twentieth" => (Kind::Tens, 20, true),
        "thirtieth" => (Kind::Tens, 30, true),
        "fortieth" => (Kind::Tens, 40, true),
        "fiftieth" => (Kind::Tens, 50, true),
        "sixtieth" => (Kind::Tens, 60, true),
        "seventieth" => (Kind::Tens, 70, true),
        "eightieth" => (Kind::Tens, 80, true),
        "ninetieth" => (Kind::Tens, 90, true),
        "hundred" => (Kind::Hundred, 100, false),
        "hundredth" => (Kind::Hundred, 100, true),
        "thousand" => (Kind::Scale, 1_000, false),
        "thousandth" => (Kind::Scale, 1_000, true),
        "million" => (Kind::Scale, 1_000_000, false),
        "millionth" => (Kind::Scale, 1_000_000, true),
        _ => return None,
    };
    Some(NumberWord {
        kind,
        value,
        ordinal,
    })
}

/// Words after which "second" names the time unit.
const SECOND_AS_UNIT_AFTER: &[&str] = &["a", "an", "one", "per", "every", "each"];

/// "two second" and "5 second" count seconds; after a tens or hundreds word
/// ("twenty second", "hundred second") it stays an ordinal.
fn second_is_unit(previous: &str) -> bool {
    SECOND_AS_UNIT_AFTER.contains(&previous)
        || (!previous.is_empty() && previous.bytes().all(|b| b.is_ascii_digit()))
        || lookup(previous).is_some_and(|w| !w.ordinal && matches!(w.kind, Kind::Unit | Kind::Teen))
}

fn number_word_at(words: &[String], i: usize) -> Option<NumberWord> {
    let word = words.get(i)?;
    if word == "second" && i > 0 && second_is_unit(&words[i - 1]) {
        return None;
    }
    lookup(word)
}

/// Accumulator for one number phrase.
#[derive(Debug, Default)]
struct Phrase {
    total: u64,
    current: u64,
    last: Option<Kind>,
    spoken_year: bool,
}

impl Phrase {
    /// Fold the next word in, or return `false` if it does not continue the phrase.
    fn push(&mut self, word: NumberWord) -> bool {
        let pair_year = matches!(self.last, Some(Kind::Teen | Kind::Tens))
            && (10..=99).contains(&self.current)
            && self.total == 0
            && !self.spoken_year;

        match (self.last, word.kind) {
            (None | Some(Kind::Tens | Kind::Hundred | Kind::Scale), Kind::Unit) => {
                self.current += word.value;
            }
            (None | Some(Kind::Hundred | Kind::Scale), Kind::Teen | Kind::Tens) => {
                self.current += word.value;
            }
            (Some(Kind::Teen | Kind::Tens), Kind::Teen | Kind::Tens) if pair_year => {
                // "nineteen ninety", "twenty twenty"
                self.current = self.current * 100 + word.value;
                self.spoken_year = true;
            }
            (None | Some(Kind::Unit | Kind::Teen | Kind::Tens), Kind::Hundred)
                if !self.spoken_year && self.current < 100 =>
            {
                self.current = self.current.max(1) * 100;
            }
            (_, Kind::Scale) if !self.spoken_year && self.last != Some(Kind::Scale) => {
                self.total = self
                    .total
                    .saturating_add(self.current.max(1).saturating_mul(word.value));
                self.current = 0;
            }
            _ => return false,
        }
        self.last = Some(word.kind);
        true
    }

    fn value(&self) -> u64 {
        self.total.saturating_add(self.current)
    }
}

/// Parse the number phrase starting at `start`; returns its value and word count.
fn parse_phrase(words: &[String], start: usize) -> Option<(u64, usize)> {
    let mut phrase = Phrase::default();
    let mut end = start;
    let mut i = start;

    while i < words.len() {
        if words[i] == "and" && phrase.last.is_some() {
            // "and" only joins two number words: "one hundred and five"
            match number_word_at(words, i + 1) {
                Some(_) => {
                    i += 1;
                    continue;
                }
                None => break,
            }
        }
        let Some(word) = number_word_at(words, i) else {
            break;
        };
        if !phrase.push(word) {
            break;
        }
        i += 1;
        end = i;
        if word.ordinal {
            break;
        }
    }

    (end > start).then(|| (phrase.value(), end - start))
}

/// Replace spelled-out cardinals and ordinals with digit strings.
pub fn convert_numbers(words: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        match parse_phrase(words, i) {
            Some((value, consumed)) => {
                out.push(value.to_string());
                i += consumed;
            }
            None => {
                out.push(words[i].clone());
                i += 1;
            }
        }
    }
    out
}
