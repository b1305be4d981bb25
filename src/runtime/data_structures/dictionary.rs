use crate::runtime::{data_structures::value::Value, error, interpreter::Interpreter};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// Handle of one word dictionary held by the `Dictionary` arena.
pub type ScopeId = usize;

/// The global dictionary is always the first one allocated and is never released.
pub const GLOBAL_SCOPE: ScopeId = 0;

/// Signature of a native message.  The handler receives the interpreter and the resolved content of
/// the receiver the message was sent to.
pub type MessageHandler = dyn Fn(&mut dyn Interpreter, &Value) -> error::Result<()>;

/// A message implemented in Rust.  The description and stack signature show up in dictionary
/// listings.
#[derive(Clone)]
pub struct NativeMessage {
    name: String,
    description: String,
    signature: String,
    handler: Rc<MessageHandler>,
}

impl NativeMessage {
    pub fn new(
        name: String,
        description: String,
        signature: String,
        handler: Rc<MessageHandler>,
    ) -> NativeMessage {
        NativeMessage {
            name,
            description,
            signature,
            handler,
        }
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn handler(&self) -> Rc<MessageHandler> {
        self.handler.clone()
    }
}

impl Display for NativeMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "native ( {} ) {}", self.signature.trim(), self.description)
    }
}

/// What a word is bound to.
#[derive(Clone)]
pub enum Binding {
    /// A value bound by the bind operator.  Lists are run when the word is sent as a message.
    Value(Value),

    /// A built-in message of a primitive type table.
    Native(NativeMessage),
}

impl Display for Binding {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Binding::Value(value) => write!(f, "{}", value),
            Binding::Native(native) => write!(f, "{}", native),
        }
    }
}

/// One dictionary entry.  A bound word carries both its binding and its own local dictionary, the
/// namespace for messages specific to that word.
#[derive(Clone)]
pub struct WordEntry {
    pub binding: Binding,

    /// Natives have no local dictionary, every word bound from a script has one.
    pub scope: Option<ScopeId>,
}

impl WordEntry {
    /// The bound value, if this is not a native.
    pub fn value(&self) -> Option<&Value> {
        match &self.binding {
            Binding::Value(value) => Some(value),
            Binding::Native(_) => None,
        }
    }
}

/// A single word dictionary.
type SubDictionary = HashMap<String, WordEntry>;

/// Owns every word dictionary in the interpreter.
///
/// Dictionaries refer to each other only through `ScopeId` handles, so a word's local dictionary
/// never holds a reference to the dictionary containing the word.  Dictionaries of words that are
/// bound again are released and their slots reused.
pub struct Dictionary {
    scopes: Vec<SubDictionary>,
    free: Vec<ScopeId>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    /// Create the arena holding only the empty global dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            scopes: vec![SubDictionary::new()],
            free: Vec::new(),
        }
    }

    /// Allocate a new empty dictionary.
    fn allocate(&mut self) -> ScopeId {
        match self.free.pop() {
            Some(scope) => scope,
            None => {
                self.scopes.push(SubDictionary::new());
                self.scopes.len() - 1
            }
        }
    }

    /// Number of dictionaries currently in use.
    pub fn live_scopes(&self) -> usize {
        self.scopes.len() - self.free.len()
    }

    /// Bind `name` to `value` in `scope`, giving it a fresh empty local dictionary.  Returns the
    /// handle of that local dictionary.  A previous binding's local dictionary is released.
    pub fn bind(&mut self, scope: ScopeId, name: String, value: Value) -> ScopeId {
        let local = self.allocate();
        let entry = WordEntry {
            binding: Binding::Value(value),
            scope: Some(local),
        };

        if let Some(previous) = self.insert(scope, name, entry)
            && let Some(previous_scope) = previous.scope
        {
            self.release(previous_scope);
        }

        local
    }

    /// Insert an entry as is, returning the entry it replaced.
    pub fn insert(&mut self, scope: ScopeId, name: String, entry: WordEntry) -> Option<WordEntry> {
        self.scopes[scope].insert(name, entry)
    }

    pub fn get(&self, scope: ScopeId, name: &str) -> Option<&WordEntry> {
        self.scopes.get(scope).and_then(|sub_dictionary| sub_dictionary.get(name))
    }

    /// The names bound in a dictionary, sorted.
    pub fn names(&self, scope: ScopeId) -> Vec<&String> {
        let mut names: Vec<&String> = match self.scopes.get(scope) {
            Some(sub_dictionary) => sub_dictionary.keys().collect(),
            None => Vec::new(),
        };

        names.sort();
        names
    }

    /// Release a dictionary and, recursively, the local dictionaries of every word in it.
    fn release(&mut self, scope: ScopeId) {
        if scope == GLOBAL_SCOPE {
            return;
        }

        let children: Vec<ScopeId> = self.scopes[scope]
            .drain()
            .filter_map(|(_, entry)| entry.scope)
            .collect();

        self.free.push(scope);

        for child in children {
            self.release(child);
        }
    }

    /// Write one dictionary's entries, one per line, each followed by its own local dictionary
    /// indented one level deeper.
    fn fmt_scope(&self, scope: ScopeId, indent: usize, f: &mut Formatter) -> fmt::Result {
        for name in self.names(scope) {
            if let Some(entry) = self.get(scope, name) {
                writeln!(f, "{:indent$}{}  --  {}", "", name, entry.binding, indent = indent)?;

                if let Some(local) = entry.scope {
                    self.fmt_scope(local, indent + 4, f)?;
                }
            }
        }

        Ok(())
    }
}

/// Lists the global dictionary and, nested under each word, everything reachable from it.  The
/// primitive type tables show up under their type names.
impl Display for Dictionary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "{} words defined.\n", self.scopes[GLOBAL_SCOPE].len())?;
        self.fmt_scope(GLOBAL_SCOPE, 0, f)
    }
}

/// The stack of active scopes, innermost last.  The global dictionary is always at the bottom.
pub struct ScopeStack {
    stack: Vec<ScopeId>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> ScopeStack {
        ScopeStack {
            stack: vec![GLOBAL_SCOPE],
        }
    }

    /// The current scope.
    pub fn top(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(GLOBAL_SCOPE)
    }

    pub fn push(&mut self, scope: ScopeId) {
        self.stack.push(scope);
    }

    /// Leave the current scope.  The global dictionary can not be left, `None` is returned instead.
    pub fn pop(&mut self) -> Option<ScopeId> {
        if self.stack.len() <= 1 {
            return None;
        }

        self.stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Walk the scopes from the innermost outwards.
    pub fn innermost_first(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.stack.iter().rev().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_gives_each_word_a_local_dictionary() {
        let mut dictionary = Dictionary::new();

        let local = dictionary.bind(GLOBAL_SCOPE, "X".to_string(), Value::Integer(1));
        let entry = dictionary.get(GLOBAL_SCOPE, "X").unwrap();

        assert_eq!(entry.scope, Some(local));
        assert_eq!(entry.value(), Some(&Value::Integer(1)));
        assert!(dictionary.names(local).is_empty());
        assert_eq!(dictionary.live_scopes(), 2);
    }

    #[test]
    fn rebinding_releases_the_whole_subtree() {
        let mut dictionary = Dictionary::new();

        let x = dictionary.bind(GLOBAL_SCOPE, "X".to_string(), Value::Integer(1));
        let y = dictionary.bind(x, "Y".to_string(), Value::Integer(2));
        let _ = dictionary.bind(y, "Z".to_string(), Value::Integer(3));
        assert_eq!(dictionary.live_scopes(), 4);

        let _ = dictionary.bind(GLOBAL_SCOPE, "X".to_string(), Value::Integer(4));
        assert_eq!(dictionary.live_scopes(), 2);
        assert!(dictionary.get(y, "Z").is_none());
    }

    #[test]
    fn released_slots_are_reused() {
        let mut dictionary = Dictionary::new();

        let first = dictionary.bind(GLOBAL_SCOPE, "X".to_string(), Value::Integer(1));
        let second = dictionary.bind(GLOBAL_SCOPE, "X".to_string(), Value::Integer(2));
        let third = dictionary.bind(GLOBAL_SCOPE, "X".to_string(), Value::Integer(3));

        assert_ne!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn display_nests_local_dictionaries() {
        let mut dictionary = Dictionary::new();

        let b = dictionary.bind(GLOBAL_SCOPE, "B".to_string(), Value::Integer(2));
        let _ = dictionary.bind(GLOBAL_SCOPE, "A".to_string(), Value::Str("a".to_string()));
        let _ = dictionary.bind(b, "RUN".to_string(), Value::List(vec![Value::Integer(1)]));

        let handler: Rc<MessageHandler> =
            Rc::new(|_: &mut dyn Interpreter, _: &Value| Ok::<(), error::ScriptError>(()));
        let native = NativeMessage::new(
            "NOP".to_string(),
            "Does nothing.".to_string(),
            " -- ".to_string(),
            handler,
        );
        let _ = dictionary.insert(
            b,
            "NOP".to_string(),
            WordEntry {
                binding: Binding::Native(native),
                scope: None,
            },
        );

        assert_eq!(
            dictionary.to_string(),
            "2 words defined.\n\n\
             A  --  'a'\n\
             B  --  2\n    \
             NOP  --  native ( -- ) Does nothing.\n    \
             RUN  --  ( 1 )\n"
        );
    }

    #[test]
    fn scope_stack_never_drops_the_global_dictionary() {
        let mut scopes = ScopeStack::new();

        scopes.push(3);
        scopes.push(5);
        assert_eq!(scopes.innermost_first().collect::<Vec<_>>(), vec![5, 3, GLOBAL_SCOPE]);

        assert_eq!(scopes.pop(), Some(5));
        assert_eq!(scopes.pop(), Some(3));
        assert_eq!(scopes.pop(), None);
        assert_eq!(scopes.top(), GLOBAL_SCOPE);
        assert_eq!(scopes.depth(), 1);
    }
}
