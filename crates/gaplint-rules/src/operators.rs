//! Whitespace around binary operators.
//!
//! A binary operator needs exactly one space on each side. An operator that
//! starts a line (a continuation) or ends one is accepted on that side.
//!
//! Not checked:
//!
//! - operators escaped with a backslash, as in operation names (`\=`, `\<`);
//! - `...`, which is not a range;
//! - unary minus, after an opening bracket, a comma, another operator, a
//!   keyword, or at the start of a line;
//! - the sign of a float exponent (`1.0e-5`).

use gaplint_core::utils::is_keyword;
use gaplint_core::{Finding, LineContext, RuleDefinition};

/// One operator rule: code, name and the operator it checks.
struct OperatorRule {
    code: &'static str,
    name: &'static str,
    operator: &'static str,
}

static RULES: [OperatorRule; 14] = [
    OperatorRule {
        code: "W014",
        name: "whitespace-op-assign",
        operator: ":=",
    },
    OperatorRule {
        code: "W015",
        name: "whitespace-op-plus",
        operator: "+",
    },
    OperatorRule {
        code: "W016",
        name: "whitespace-op-multiply",
        operator: "*",
    },
    OperatorRule {
        code: "W017",
        name: "whitespace-op-minus",
        operator: "-",
    },
    OperatorRule {
        code: "W018",
        name: "whitespace-op-less-than",
        operator: "<",
    },
    OperatorRule {
        code: "W019",
        name: "whitespace-op-less-equal",
        operator: "<=",
    },
    OperatorRule {
        code: "W020",
        name: "whitespace-op-more-than",
        operator: ">",
    },
    OperatorRule {
        code: "W021",
        name: "whitespace-op-more-equal",
        operator: ">=",
    },
    OperatorRule {
        code: "W022",
        name: "whitespace-op-equals",
        operator: "=",
    },
    OperatorRule {
        code: "W023",
        name: "whitespace-op-mapping",
        operator: "->",
    },
    OperatorRule {
        code: "W024",
        name: "whitespace-op-divide",
        operator: "/",
    },
    OperatorRule {
        code: "W025",
        name: "whitespace-op-power",
        operator: "^",
    },
    OperatorRule {
        code: "W026",
        name: "whitespace-op-not-equal",
        operator: "<>",
    },
    OperatorRule {
        code: "W027",
        name: "whitespace-double-dot",
        operator: "..",
    },
];

/// Lexemes in match order: longer operators shadow their prefixes.
const LEXEMES: &[&str] = &[
    "...", ":=", "->", "<>", "<=", ">=", "..", "+", "-", "*", "/", "^", "<", ">", "=",
];

/// Characters after which `-` is a sign rather than subtraction.
const SIGN_CONTEXT: &str = "([{,;:=<>+-*/^.";

/// An operator occurrence on a clean line, in character indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Occurrence {
    operator: &'static str,
    start: usize,
    end: usize,
}

/// Returns all operator rules, W014 to W027.
#[must_use]
pub fn rules() -> Vec<RuleDefinition> {
    vec![
        rule::<0>(),
        rule::<1>(),
        rule::<2>(),
        rule::<3>(),
        rule::<4>(),
        rule::<5>(),
        rule::<6>(),
        rule::<7>(),
        rule::<8>(),
        rule::<9>(),
        rule::<10>(),
        rule::<11>(),
        rule::<12>(),
        rule::<13>(),
    ]
}

fn rule<const INDEX: usize>() -> RuleDefinition {
    let spec = &RULES[INDEX];
    RuleDefinition::warning(
        spec.code,
        spec.name,
        "Warns if an operator is not surrounded by exactly one space",
        check::<INDEX>,
    )
}

fn check<const INDEX: usize>(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    let operator = RULES[INDEX].operator;
    let chars: Vec<char> = ctx.clean.chars().collect();

    for occurrence in scan(&chars) {
        if occurrence.operator == operator && badly_spaced(&chars, occurrence) {
            out.push(
                Finding::new(format!("wrong whitespace around operator {operator}"))
                    .at_column(occurrence.start + 1),
            );
        }
    }
}

/// Finds the binary operators of a clean line.
fn scan(chars: &[char]) -> Vec<Occurrence> {
    let mut found = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let Some(&lexeme) = LEXEMES.iter().find(|lexeme| starts_with(chars, i, lexeme)) else {
            i += 1;
            continue;
        };
        let end = i + lexeme.len();

        let escaped = i > 0 && chars[i - 1] == '\\';
        if !escaped && lexeme != "..." && !is_sign(chars, i, lexeme) {
            found.push(Occurrence {
                operator: lexeme,
                start: i,
                end,
            });
        }
        i = end;
    }

    found
}

fn starts_with(chars: &[char], at: usize, lexeme: &str) -> bool {
    lexeme
        .chars()
        .enumerate()
        .all(|(k, c)| chars.get(at + k) == Some(&c))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '@'
}

/// Whether `+` or `-` at `at` is a sign: unary minus or an exponent sign.
fn is_sign(chars: &[char], at: usize, lexeme: &str) -> bool {
    if lexeme != "-" && lexeme != "+" {
        return false;
    }
    let Some(prev) = chars[..at].iter().rposition(|c| !c.is_whitespace()) else {
        return lexeme == "-";
    };

    if is_word_char(chars[prev]) {
        let word_start = chars[..prev]
            .iter()
            .rposition(|&c| !is_word_char(c))
            .map_or(0, |p| p + 1);
        let word: String = chars[word_start..=prev].iter().collect();

        let exponent = prev + 1 == at
            && word.starts_with(|c: char| c.is_ascii_digit())
            && word.ends_with(|c: char| c == 'e' || c == 'E');
        if exponent {
            return true;
        }
        let component = word_start > 0 && chars[word_start - 1] == '.';
        return lexeme == "-" && !component && is_keyword(&word);
    }

    lexeme == "-" && SIGN_CONTEXT.contains(chars[prev])
}

fn badly_spaced(chars: &[char], occurrence: Occurrence) -> bool {
    let Occurrence { start, end, .. } = occurrence;

    let first_code = chars.iter().position(|c| !c.is_whitespace());
    let left_ok = first_code == Some(start)
        || (start >= 2 && chars[start - 1] == ' ' && !chars[start - 2].is_whitespace());

    let rest = &chars[end..];
    let right_ok = rest.iter().all(|c| c.is_whitespace())
        || (rest.len() >= 2 && rest[0] == ' ' && !rest[1].is_whitespace());

    !(left_ok && right_ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lint;

    fn operators(line: &str) -> Vec<&'static str> {
        let chars: Vec<char> = line.chars().collect();
        scan(&chars).into_iter().map(|o| o.operator).collect()
    }

    fn lint_all(source: &str) -> Vec<(usize, String)> {
        rules()
            .into_iter()
            .flat_map(|rule| lint(rule, source))
            .map(|(line, _, message)| (line, message))
            .collect()
    }

    #[test]
    fn test_rule_table() {
        let rules = rules();
        assert_eq!(rules.len(), 14);
        assert_eq!(rules[0].code, "W014");
        assert_eq!(rules[13].name, "whitespace-double-dot");
    }

    #[test]
    fn test_longest_lexeme_wins() {
        assert_eq!(operators("x := a <= b;"), vec![":=", "<="]);
        assert_eq!(operators("a <> b -> c >= d"), vec!["<>", "->", ">="]);
        assert_eq!(operators("[1 .. n]"), vec![".."]);
    }

    #[test]
    fn test_ignored_lexemes() {
        assert!(operators("f := function(arg...)").contains(&":="));
        assert!(!operators("f(arg...)").contains(&".."));
        assert!(operators("InstallMethod(\\=, x)").is_empty());
        assert!(operators("\\<").is_empty());
    }

    #[test]
    fn test_unary_and_exponent_minus() {
        assert!(operators("f(-1, [-2], x, -y)").is_empty());
        assert!(operators("return -1;").is_empty());
        assert_eq!(operators("x := -1;"), vec![":="]);
        assert_eq!(operators("x := 2.0e-5 + 1e+3;"), vec![":=", "+"]);
        assert_eq!(operators("a - b"), vec!["-"]);
        assert_eq!(operators("a -b"), vec!["-"]);
        assert_eq!(operators("r.return - 1"), vec!["-"]);
    }

    #[test]
    fn test_well_spaced_code_is_clean() {
        let source = "\
x := a + b * c - d / e ^ 2;
if a < b or a <= b or a > b or a >= b or a = b or a <> b then
  l := List([1 .. 10], i -> -i);
fi;
y := 1
     + 2;
z := 1 +
     2;
";
        assert!(lint_all(source).is_empty(), "{:?}", lint_all(source));
    }

    #[test]
    fn test_each_badly_spaced_operator() {
        let cases = [
            ("x:=1;", "wrong whitespace around operator :="),
            ("x := 1+ 2;", "wrong whitespace around operator +"),
            ("x := 1 *2;", "wrong whitespace around operator *"),
            ("x := 1  - 2;", "wrong whitespace around operator -"),
            ("b := 1<2;", "wrong whitespace around operator <"),
            ("b := 1 <=2;", "wrong whitespace around operator <="),
            ("b := 1> 2;", "wrong whitespace around operator >"),
            ("b := 1 >=  2;", "wrong whitespace around operator >="),
            ("b := 1=2;", "wrong whitespace around operator ="),
            ("f := x->x;", "wrong whitespace around operator ->"),
            ("x := 1/2;", "wrong whitespace around operator /"),
            ("x := 2^3;", "wrong whitespace around operator ^"),
            ("b := 1<>2;", "wrong whitespace around operator <>"),
            ("l := [1..3];", "wrong whitespace around operator .."),
        ];
        for (line, message) in cases {
            let reported = lint_all(&format!("{line}\n"));
            assert_eq!(reported, vec![(1, message.to_string())], "{line}");
        }
    }

    #[test]
    fn test_every_occurrence_is_reported() {
        let reported = lint(rules().remove(1), "x := 1+2+3;\n");
        let columns: Vec<Option<usize>> = reported.iter().map(|(_, c, _)| *c).collect();
        assert_eq!(columns, vec![Some(7), Some(9)]);
    }

    #[test]
    fn test_strings_and_comments_ignored() {
        assert!(lint_all("s := \"a+b\"; # x:=1\n").is_empty());
    }
}
