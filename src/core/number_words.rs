//! Number to word conversion
//!
//! Produces one token per spoken word, so "twenty-second" comes out as
//! `["twenty", "second"]`. Hundreds are followed by "and" the way English
//! speakers read them aloud ("one hundred and five"), and no punctuation is
//! ever emitted.

use super::token::Token;

const UNITS: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Scale words for each group of three digits, lowest first
const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// Cardinal words for `n`, negative values prefixed with "minus"
pub fn cardinal(n: i64) -> Vec<Token> {
    let mut words = Vec::new();
    if n < 0 {
        words.push("minus");
    }
    spell(n.unsigned_abs(), &mut words);
    words.into_iter().map(Token::known).collect()
}

/// Ordinal words for `n` ("first", "twenty second", "one hundredth")
pub fn ordinal(n: i64) -> Vec<Token> {
    let mut words = Vec::new();
    if n < 0 {
        words.push("minus");
    }
    spell(n.unsigned_abs(), &mut words);

    let mut tokens: Vec<Token> = words.iter().map(|w| Token::known(*w)).collect();
    if let (Some(last_word), Some(last)) = (words.last(), tokens.last_mut()) {
        *last = Token::known(ordinal_suffix(last_word));
    }
    tokens
}

fn ordinal_suffix(word: &str) -> String {
    match word {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
        w => format!("{}th", w),
    }
}

fn spell(n: u64, out: &mut Vec<&'static str>) {
    if n == 0 {
        out.push(UNITS[0]);
        return;
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push((rest % 1000) as usize);
        rest /= 1000;
    }

    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        // "one thousand and five": a bare tail under a hundred gets "and"
        if scale == 0 && group < 100 && groups.len() > 1 {
            out.push("and");
        }
        spell_group(group, out);
        if scale > 0 {
            out.push(SCALES[scale]);
        }
    }
}

fn spell_group(group: usize, out: &mut Vec<&'static str>) {
    let hundreds = group / 100;
    let rest = group % 100;

    if hundreds > 0 {
        out.push(UNITS[hundreds]);
        out.push("hundred");
        if rest > 0 {
            out.push("and");
        }
    }

    if rest == 0 {
        return;
    }
    if rest < 20 {
        out.push(UNITS[rest]);
    } else {
        out.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            out.push(UNITS[rest % 10]);
        }
    }
}
