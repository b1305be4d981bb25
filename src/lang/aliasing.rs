use crate::{
    lang::tokenizing::{Token, TokenList},
    runtime::error::{self, ErrorKind, ScriptError},
};
use std::collections::HashMap;

/// Starts the body of an alias definition.
pub const ALIAS_OPEN: &str = "[";

/// Ends the body of an alias definition.  The word that follows is the alias name.
pub const ALIAS_CLOSE: &str = "]";

/// The aliases defined by one source text, mapping each alias name to the words it stands for.
///
/// The table is filled while the token list is scanned and is only consulted during that same scan.
/// Nothing is carried over to the next source text.
#[derive(Default)]
pub struct AliasTable {
    aliases: HashMap<String, TokenList>,
}

impl AliasTable {
    pub fn new() -> AliasTable {
        AliasTable {
            aliases: HashMap::new(),
        }
    }

    /// Remove every `[ word* ] name` definition from the token list and replace each later use of
    /// `name` with its words.
    ///
    /// The scan is a single left to right pass.  A body may use aliases defined before it, they are
    /// substituted as the body is recorded.  Substituted words are never scanned again.
    pub fn expand(&mut self, tokens: TokenList) -> error::Result<TokenList> {
        let mut expanded = TokenList::with_capacity(tokens.len());
        let mut iter = tokens.into_iter();

        while let Some(token) = iter.next() {
            match token.text() {
                ALIAS_OPEN => self.define(&token, &mut iter)?,

                ALIAS_CLOSE => {
                    return ScriptError::at(
                        ErrorKind::Malformed,
                        token.location(),
                        format!("Found {} without a matching {}.", ALIAS_CLOSE, ALIAS_OPEN),
                    );
                }

                _ => self.substitute(&token, &mut expanded),
            }
        }

        Ok(expanded)
    }

    /// Record one alias definition, the opening bracket has already been consumed.
    fn define(
        &mut self,
        open: &Token,
        iter: &mut impl Iterator<Item = Token>,
    ) -> error::Result<()> {
        let mut body = TokenList::new();

        loop {
            let Some(token) = iter.next() else {
                return ScriptError::at(
                    ErrorKind::Unterminated,
                    open.location(),
                    "Unexpected end of file in alias definition.".to_string(),
                );
            };

            match token.text() {
                ALIAS_CLOSE => break,

                ALIAS_OPEN => {
                    return ScriptError::at(
                        ErrorKind::Malformed,
                        token.location(),
                        "Alias definitions can not be nested.".to_string(),
                    );
                }

                _ => self.substitute(&token, &mut body),
            }
        }

        match iter.next() {
            Some(name) => {
                tracing::trace!(alias = name.text(), words = body.len(), "define alias");
                let _ = self.aliases.insert(name.text().to_string(), body);
                Ok(())
            }

            None => ScriptError::at(
                ErrorKind::Unterminated,
                open.location(),
                "Alias definition is missing its name.".to_string(),
            ),
        }
    }

    /// Append either the token itself or, if it names an alias, the alias' words tagged with the
    /// token's location.
    fn substitute(&self, token: &Token, output: &mut TokenList) {
        match self.aliases.get(token.text()) {
            Some(body) => output.extend(body.iter().map(|word| word.relocated(token.location()))),
            None => output.push(token.clone()),
        }
    }
}

/// Expand the aliases of a single source text.
pub fn expand_aliases(tokens: TokenList) -> error::Result<TokenList> {
    AliasTable::new().expand(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::tokenizing::tokenize_from_source;

    fn expand(source: &str) -> error::Result<Vec<String>> {
        let tokens = tokenize_from_source("<test>", source)?;
        let expanded = expand_aliases(tokens)?;

        Ok(expanded.iter().map(|token| token.text().to_string()).collect())
    }

    #[test]
    fn definition_is_removed_and_uses_are_replaced() {
        assert_eq!(
            expand("[ 1 + ! ] INC 5 INC INC").unwrap(),
            vec!["5", "1", "+", "!", "1", "+", "!"]
        );
    }

    #[test]
    fn uses_before_the_definition_are_kept() {
        assert_eq!(expand("ONE [ 1 ] ONE ONE").unwrap(), vec!["ONE", "1"]);
    }

    #[test]
    fn empty_alias_expands_to_nothing() {
        assert_eq!(expand("a [ ] NOTHING NOTHING b").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn earlier_aliases_are_substituted_inside_later_bodies() {
        assert_eq!(
            expand("[ 1 ] ONE [ ONE ONE + ! ] TWO TWO").unwrap(),
            vec!["1", "1", "+", "!"]
        );
    }

    #[test]
    fn expansions_are_not_rescanned() {
        // SELF was not yet an alias while its own body was being recorded.
        assert_eq!(expand("[ SELF ] SELF SELF").unwrap(), vec!["SELF"]);
    }

    #[test]
    fn expanded_words_take_the_use_site_location() {
        let tokens = tokenize_from_source("<test>", "[ 1 2 ] PAIR\nPAIR").unwrap();
        let expanded = expand_aliases(tokens).unwrap();

        assert!(expanded.iter().all(|token| token.location().line() == 2));
    }

    #[test]
    fn unterminated_definition_is_an_error() {
        let error = expand("[ 1 2").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Unterminated);
        assert_eq!(error.location().as_ref().unwrap().column(), 1);
    }

    #[test]
    fn missing_name_is_an_error() {
        assert_eq!(expand("[ 1 2 ]").unwrap_err().kind(), ErrorKind::Unterminated);
    }

    #[test]
    fn stray_close_is_an_error() {
        let error = expand("1 ] 2").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Malformed);
        assert_eq!(error.location().as_ref().unwrap().column(), 3);
    }

    #[test]
    fn nested_definition_is_an_error() {
        assert_eq!(expand("[ [ 1 ] A ] B").unwrap_err().kind(), ErrorKind::Malformed);
    }
}
