//! 模板替换引擎 - 业务能力层
//!
//! 只做字面量查找替换，没有循环、条件等模板语法。

use crate::models::SubstitutionRule;

/// 模板替换引擎
pub struct TemplateEngine;

impl TemplateEngine {
    /// 按顺序执行替换规则
    ///
    /// 每条规则作用在上一条规则的结果上，所以后面的规则能看到前面替换进来的文本。
    /// 匹配是精确、区分大小写的字面量匹配；标记不存在时什么也不做。
    pub fn apply(markup: &str, rules: &[SubstitutionRule]) -> String {
        rules.iter().fold(markup.to_string(), |text, rule| {
            if rule.marker.is_empty() || !text.contains(&rule.marker) {
                text
            } else {
                text.replace(&rule.marker, &rule.replacement)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(marker: &str, replacement: &str) -> SubstitutionRule {
        SubstitutionRule::new(marker, replacement)
    }

    #[test]
    fn test_absent_marker_is_noop() {
        let text = "<w:t>Hola</w:t>";
        assert_eq!(TemplateEngine::apply(text, &[rule("TPL_KEY", "K1")]), text);
    }

    #[test]
    fn test_rules_apply_to_previous_output() {
        let rules = [rule("A", "B"), rule("B", "C")];
        assert_eq!(TemplateEngine::apply("A", &rules), "C");

        let reversed = [rule("B", "C"), rule("A", "B")];
        assert_eq!(TemplateEngine::apply("A", &reversed), "B");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let out = TemplateEngine::apply("2000720 / 2000720 / 2000720", &[rule("2000720", "3001")]);
        assert_eq!(out, "3001 / 3001 / 3001");
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        assert_eq!(TemplateEngine::apply("aaa", &[rule("aa", "b")]), "ba");
    }

    #[test]
    fn test_pattern_characters_are_literal() {
        let text = "precio: $10.00 (aprox.*)";
        let out = TemplateEngine::apply(text, &[rule("$10.00", "$12.50"), rule(".*", "")]);
        assert_eq!(out, "precio: $12.50 (aprox)");

        // `.` 不能匹配任意字符
        assert_eq!(TemplateEngine::apply("abc", &[rule("a.c", "x")]), "abc");
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(TemplateEngine::apply("Mezcla MEZCLA", &[rule("MEZCLA", "X")]), "Mezcla X");
    }

    #[test]
    fn test_replacement_containing_own_marker_does_not_loop() {
        let out = TemplateEngine::apply("MEZCLA DE:", &[rule("MEZCLA DE:", "MEZCLA DE: agua")]);
        assert_eq!(out, "MEZCLA DE: agua");
    }

    #[test]
    fn test_deterministic() {
        let rules = [rule("x", "xy"), rule("y", "z"), rule("zz", "!")];
        let first = TemplateEngine::apply("x y x", &rules);
        for _ in 0..10 {
            assert_eq!(TemplateEngine::apply("x y x", &rules), first);
        }
    }
}
