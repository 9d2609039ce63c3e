/// A prompt with `{placeholder}` slots.
///
/// Substitution is a single pass over the template, so placeholder-looking
/// text inside a substituted value is never expanded again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub template: &'static str,
}

impl PromptTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    /// Fill the template. Unknown placeholders are left as written.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len() + 64);
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };

            let key = &after[..close];
            match vars.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(key);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: PromptTemplate = PromptTemplate::new("Say {word} in {language}.");

    #[test]
    fn fills_every_slot() {
        let rendered = GREETING.render(&[("word", "hello"), ("language", "French")]);
        assert_eq!(rendered, "Say hello in French.");
    }

    #[test]
    fn values_are_not_expanded_twice() {
        let rendered = GREETING.render(&[("word", "{language}"), ("language", "French")]);
        assert_eq!(rendered, "Say {language} in French.");
    }

    #[test]
    fn unknown_and_unterminated_slots_stay_literal() {
        let template = PromptTemplate::new("a {missing} b {open");
        assert_eq!(template.render(&[]), "a {missing} b {open");
    }
}
