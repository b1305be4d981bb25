use std::{ collections::HashMap,
           fs::{ metadata, canonicalize },
           path::{ Path,
                   PathBuf },
           rc::Rc };
use tracing::{ debug, trace };
use crate::{ lang::{ aliasing::expand_aliases,
                     code::ControlWord,
                     compilation::{ Compiled,
                                    ListCompiler },
                     source_buffer::SourceLocation,
                     tokenizing::{ tokenize_from_file,
                                   tokenize_from_source,
                                   TokenList } },
             location_here,
             runtime::{ built_ins::control_words::execute_control_word,
                        data_structures::{ dictionary::{ Binding,
                                                         Dictionary,
                                                         MessageHandler,
                                                         NativeMessage,
                                                         ScopeId,
                                                         ScopeStack,
                                                         WordEntry,
                                                         GLOBAL_SCOPE },
                                           value::{ PrimitiveType,
                                                    Value } },
                        error::{ self,
                                 ErrorKind,
                                 script_error,
                                 script_error_str },
                        interpreter::{ CallItem,
                                       CallStack,
                                       CodeManagement,
                                       Interpreter,
                                       InterpreterStack,
                                       MessageDispatch,
                                       ScopeManagement,
                                       ValueStack,
                                       DEFAULT_MAX_EVALUATION_DEPTH } } };



/// The search paths used to find Kriek source files.
pub type SearchPaths = Vec<String>;



/// The core interpreter implementation for the Kriek language.
///
/// All interpreter state lives here and is shared by every nested evaluation: a list run as a
/// message sees, and changes, the same operand stack and scopes as the code that sent it.
pub struct KriekInterpreter
{
    search_paths: SearchPaths,

    /// The operand stack.
    stack: ValueStack,


    /// The location of the top level word being processed.
    current_location: Option<SourceLocation>,

    /// The dispatches in progress.
    call_stack: CallStack,

    /// Receivers of the dispatches in progress.  Pushed and popped exactly once per dispatch.
    receivers: Vec<Value>,


    /// Every word dictionary, the global one included.
    dictionary: Dictionary,

    /// Active scopes, global dictionary at the bottom.
    scopes: ScopeStack,

    /// The message table of each primitive type.
    type_tables: HashMap<PrimitiveType, ScopeId>,


    /// Collects words into list values between list markers.
    compiler: ListCompiler,

    evaluation_depth: usize,

    max_evaluation_depth: usize
}


impl Default for KriekInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}


impl Interpreter for KriekInterpreter
{
    fn add_search_path(&mut self, path: &str) -> error::Result<()>
    {
        if let Err(err) = metadata(path)
        {
            script_error(self,
                         ErrorKind::Io,
                         format!("Could not append search path {}: {}.", path, err))?;
        }

        self.search_paths.push(path.to_string());
        Ok(())
    }

    fn find_file(&self, path: &str) -> error::Result<String>
    {
        let canonical_string = |full_path: &Path| -> error::Result<String>
            {
                let canonical = canonicalize(full_path)?;

                match canonical.to_str()
                {
                    Some(canonical) => Ok(canonical.to_string()),
                    None => script_error_str(self, ErrorKind::Io, "Path contains invalid characters.")
                }
            };

        if Path::new(path).exists()
        {
            return canonical_string(Path::new(path));
        }

        for directory in self.search_paths.iter().rev()
        {
            let full_path = PathBuf::from(directory).join(path);

            if full_path.exists()
            {
                return canonical_string(&full_path);
            }
        }

        script_error(self, ErrorKind::Io, format!("File {} not found.", path))
    }

    fn max_evaluation_depth(&self) -> usize
    {
        self.max_evaluation_depth
    }

    fn set_max_evaluation_depth(&mut self, depth: usize)
    {
        self.max_evaluation_depth = depth;
    }
}


impl InterpreterStack for KriekInterpreter
{
    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn push(&mut self, value: Value)
    {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        match self.stack.pop()
        {
            Some(value) => Ok(value),
            None => script_error_str(self, ErrorKind::StackUnderflow, "Stack underflow.")
        }
    }

    fn pop_resolved(&mut self) -> error::Result<Value>
    {
        let value = self.pop()?;

        match self.resolve_value(&value)
        {
            Some(resolved) => Ok(resolved),
            None => script_error(self,
                                 ErrorKind::UnboundWord,
                                 format!("Word {} is not bound in the current scope.", value))
        }
    }

    fn pop_as_int(&mut self) -> error::Result<i64>
    {
        let value = self.pop_resolved()?;
        Ok(*value.as_integer(self)?)
    }

    fn pop_as_bool(&mut self) -> error::Result<bool>
    {
        let value = self.pop_resolved()?;
        Ok(*value.as_boolean(self)?)
    }

    fn pop_as_list(&mut self) -> error::Result<Vec<Value>>
    {
        match self.pop_resolved()?
        {
            Value::List(items) => Ok(items),
            other => script_error(self,
                                  ErrorKind::TypeMismatch,
                                  format!("Expected LIST value, found {}.", other))
        }
    }

    fn peek_at(&self, depth: usize) -> error::Result<Value>
    {
        if depth >= self.stack.len()
        {
            return script_error(self,
                                ErrorKind::BadIndex,
                                format!("Index {} out of range of stack size {}.",
                                        depth,
                                        self.stack.len()));
        }

        Ok(self.stack[self.stack.len() - 1 - depth].clone())
    }

    fn pick(&mut self, depth: usize) -> error::Result<Value>
    {
        if depth >= self.stack.len()
        {
            return script_error(self,
                                ErrorKind::BadIndex,
                                format!("Index {} out of range of stack size {}.",
                                        depth,
                                        self.stack.len()));
        }

        let index = self.stack.len() - 1 - depth;
        Ok(self.stack.remove(index))
    }
}


impl ScopeManagement for KriekInterpreter
{
    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn scopes(&self) -> &ScopeStack
    {
        &self.scopes
    }

    fn type_table(&self, primitive: PrimitiveType) -> ScopeId
    {
        self.type_tables[&primitive]
    }

    fn bind(&mut self, word: &Value, value: Value) -> error::Result<()>
    {
        let name = word.key();
        let scope = self.scopes.top();

        if scope == GLOBAL_SCOPE && PrimitiveType::from_name(&name).is_some()
        {
            return script_error(self,
                                ErrorKind::ProtectedWord,
                                format!("Can not rebind primitive type {}.", name));
        }

        debug!(word = %name, value = %value, scope, "bind");

        let _ = self.dictionary.bind(scope, name, value);
        Ok(())
    }

    fn enter(&mut self, word: &Value) -> error::Result<()>
    {
        let name = word.key();
        let local = match self.dictionary.get(self.scopes.top(), &name)
            {
                Some(entry) => entry.scope,
                None => return script_error(self,
                                            ErrorKind::UnboundWord,
                                            format!("Word {} not found in current dictionary.",
                                                    name))
            };

        match local
        {
            Some(local) =>
                {
                    debug!(word = %name, scope = local, "enter scope");
                    self.scopes.push(local);
                    Ok(())
                },

            None => script_error(self,
                                 ErrorKind::UnboundWord,
                                 format!("Word {} has no local dictionary.", name))
        }
    }

    fn leave(&mut self) -> error::Result<()>
    {
        match self.scopes.pop()
        {
            Some(scope) =>
                {
                    debug!(scope, "leave scope");
                    Ok(())
                },

            None => script_error_str(self, ErrorKind::ScopeUnderflow, "Scope stack underflow.")
        }
    }

    fn resolve_value(&self, value: &Value) -> Option<Value>
    {
        match value
        {
            Value::Word(name) => self.dictionary
                                     .get(self.scopes.top(), name)
                                     .and_then(|entry| entry.value())
                                     .cloned(),

            literal => Some(literal.clone())
        }
    }

    fn find_ancestor_scope(&self, name: &str) -> Option<ScopeId>
    {
        self.scopes
            .innermost_first()
            .find(|scope|
                  {
                      self.dictionary
                          .get(*scope, name)
                          .is_some_and(|entry| entry.scope.is_some())
                  })
    }

    fn add_native_message(&mut self,
                          primitive: PrimitiveType,
                          name: String,
                          handler: Rc<MessageHandler>,
                          description: String,
                          signature: String)
    {
        let native = NativeMessage::new(name.clone(), description, signature, handler);
        let table = self.type_table(primitive);

        let _ = self.dictionary.insert(table,
                                       name,
                                       WordEntry { binding: Binding::Native(native), scope: None });
    }
}


impl MessageDispatch for KriekInterpreter
{
    fn send(&mut self, receiver: Value, message: Value) -> error::Result<()>
    {
        let receiver_name = receiver.key();
        let message_name = message.key();
        let location = self.current_location.clone().unwrap_or_else(|| location_here!());

        self.receivers.push(receiver.clone());
        self.call_stack.push(CallItem::new(receiver_name.clone(), message_name.clone(), location));

        let result = self.dispatch(&receiver, &receiver_name, &message_name);

        let _ = self.call_stack.pop();
        let _ = self.receivers.pop();

        result
    }

    fn current_receiver(&self) -> Option<&Value>
    {
        self.receivers.last()
    }

    fn receiver_depth(&self) -> usize
    {
        self.receivers.len()
    }

    fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }

    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }
}


impl CodeManagement for KriekInterpreter
{
    fn process_value(&mut self, value: Value) -> error::Result<()>
    {
        match self.compiler.process(value)
        {
            Ok(Compiled::Collected) => Ok(()),

            Ok(Compiled::Finished(list)) =>
                {
                    trace!(list = %list, "compiled list");
                    self.push(list);
                    Ok(())
                },

            Ok(Compiled::Run(value)) =>
                {
                    trace!(word = %value, "run word");

                    let control = value.as_word().and_then(ControlWord::from_word);

                    match control
                    {
                        Some(control) => self.execute_control(control),
                        None =>
                            {
                                self.push(value);
                                Ok(())
                            }
                    }
                },

            Err(error) => script_error(self, error.kind(), error.to_string())
        }
    }

    fn execute_control(&mut self, control: ControlWord) -> error::Result<()>
    {
        execute_control_word(self, control)
    }

    fn evaluate(&mut self, words: &[Value]) -> error::Result<()>
    {
        if self.evaluation_depth >= self.max_evaluation_depth
        {
            return script_error(self,
                                ErrorKind::DepthExceeded,
                                format!("Maximum evaluation depth {} exceeded.",
                                              self.max_evaluation_depth));
        }

        self.evaluation_depth += 1;

        let mut result = Ok(());

        for word in words.iter()
        {
            result = self.process_value(word.clone());

            if result.is_err()
            {
                break;
            }
        }

        self.evaluation_depth -= 1;
        result
    }

    fn evaluation_depth(&self) -> usize
    {
        self.evaluation_depth
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        let tokens = tokenize_from_source(path, source)?;
        self.process_tokens(tokens)
    }

    fn process_source_file(&mut self, path: &str) -> error::Result<()>
    {
        let full_path = self.find_file(path)?;
        let tokens = tokenize_from_file(&full_path)?;

        self.process_tokens(tokens)
    }
}


impl KriekInterpreter
{
    /// Create an interpreter whose global dictionary holds the five primitive types, each with an
    /// empty message table.  Native messages are added by the `register_*` functions.
    pub fn new() -> KriekInterpreter
    {
        let mut dictionary = Dictionary::new();
        let mut type_tables = HashMap::new();

        for primitive in PrimitiveType::ALL
        {
            let table = dictionary.bind(GLOBAL_SCOPE,
                                        primitive.name().to_string(),
                                        primitive.default_value());
            let _ = type_tables.insert(primitive, table);
        }

        KriekInterpreter
            {
                search_paths: SearchPaths::new(),
                stack: ValueStack::new(),
                current_location: None,
                call_stack: CallStack::new(),
                receivers: Vec::new(),
                dictionary,
                scopes: ScopeStack::new(),
                type_tables,
                compiler: ListCompiler::new(),
                evaluation_depth: 0,
                max_evaluation_depth: DEFAULT_MAX_EVALUATION_DEPTH
            }
    }

    /// Expand aliases then run every word, tracking the location of each for error reporting.
    fn process_tokens(&mut self, tokens: TokenList) -> error::Result<()>
    {
        let tokens = expand_aliases(tokens)?;
        let mut result = Ok(());

        for token in tokens.iter()
        {
            self.current_location = Some(token.location().clone());
            result = self.process_value(Value::classify(token.text()));

            if result.is_err()
            {
                break;
            }
        }

        // An error leaves the compiler mid list, so reset it in every case.
        let finished = self.compiler.finish();

        result?;

        if let Err(error) = finished
        {
            return script_error(self, error.kind(), error.to_string());
        }

        self.current_location = None;
        Ok(())
    }

    /// Look for `message` in the local dictionary of the entry named `receiver_name` in `scope`.
    fn local_message(&self, scope: ScopeId, receiver_name: &str, message: &str)
        -> Option<WordEntry>
    {
        let local = self.dictionary.get(scope, receiver_name)?.scope?;
        self.dictionary.get(local, message).cloned()
    }

    /// Look for `message` in the message table of the primitive type of `content`.
    fn type_message(&self, content: &Value, message: &str) -> Option<WordEntry>
    {
        let primitive = content.primitive_type()?;
        self.dictionary.get(self.type_table(primitive), message).cloned()
    }

    fn dispatch(&mut self, receiver: &Value, receiver_name: &str, message_name: &str)
        -> error::Result<()>
    {
        let scope = self.scopes.top();
        let content = self.resolve_value(receiver);

        if let Some(entry) = self.local_message(scope, receiver_name, message_name)
        {
            debug!(receiver = receiver_name, message = message_name, "dispatch to local dictionary");
            let content = content.unwrap_or_else(|| receiver.clone());
            return self.invoke(entry, &content);
        }

        if let Some(content) = &content
            && let Some(entry) = self.type_message(content, message_name)
        {
            debug!(receiver = receiver_name, message = message_name, "dispatch to type table");
            return self.invoke(entry, content);
        }

        if let Some(ancestor) = self.find_ancestor_scope(receiver_name)
        {
            let ancestor_content = self.dictionary
                                       .get(ancestor, receiver_name)
                                       .and_then(|entry| entry.value())
                                       .cloned();

            if let Some(entry) = self.local_message(ancestor, receiver_name, message_name)
            {
                debug!(receiver = receiver_name,
                       message = message_name,
                       scope = ancestor,
                       "dispatch to ancestor local dictionary");
                let ancestor_content = ancestor_content.unwrap_or_else(|| receiver.clone());
                return self.invoke(entry, &ancestor_content);
            }

            if let Some(ancestor_content) = &ancestor_content
                && let Some(entry) = self.type_message(ancestor_content, message_name)
            {
                debug!(receiver = receiver_name,
                       message = message_name,
                       scope = ancestor,
                       "dispatch to ancestor type table");
                return self.invoke(entry, ancestor_content);
            }

            return script_error(self,
                                ErrorKind::UnknownMessage,
                                format!("No message {} in word {}.", message_name, receiver_name));
        }

        match content
        {
            Some(_) => script_error(self,
                                    ErrorKind::UnknownMessage,
                                    format!("No message {} in word {}.",
                                            message_name,
                                            receiver_name)),
            None => script_error(self,
                                 ErrorKind::UnboundWord,
                                 format!("Word {} not found in any scope, can not send {}.",
                                         receiver_name,
                                         message_name))
        }
    }

    /// Run a resolved message.  Natives get the receiver's content, lists are evaluated, and any
    /// other value is run as a one word program.
    fn invoke(&mut self, entry: WordEntry, content: &Value) -> error::Result<()>
    {
        match entry.binding
        {
            Binding::Native(native) =>
                {
                    trace!(message = %native.name(), receiver = %content, "run native");

                    let handler = native.handler();
                    handler(self, content)
                },

            Binding::Value(Value::List(words)) => self.evaluate(&words),

            Binding::Value(value) => self.evaluate(std::slice::from_ref(&value))
        }
    }
}
