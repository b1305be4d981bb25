use std::fmt::{self, Display, Formatter};
use crate::runtime::{ error::{ self,
                               script_error,
                               ErrorKind },
                      interpreter::Interpreter };



/// The literal words for the two boolean values.
pub const TRUE_WORD: &str = "YES";
pub const FALSE_WORD: &str = "NO";



/// The five primitive types.  Each has an entry of the same name in the global dictionary whose
/// local dictionary is the type's message table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PrimitiveType
{
    Integer,
    Float,
    String,
    Boolean,
    List
}


impl PrimitiveType
{
    /// All primitive types, in classification order.
    pub const ALL: [PrimitiveType; 5] = [ PrimitiveType::Integer,
                                          PrimitiveType::Float,
                                          PrimitiveType::String,
                                          PrimitiveType::Boolean,
                                          PrimitiveType::List ];

    /// The name of the type's entry in the global dictionary.
    pub fn name(&self) -> &'static str
    {
        match self
        {
            PrimitiveType::Integer => "INTEGER",
            PrimitiveType::Float   => "FLOAT",
            PrimitiveType::String  => "STRING",
            PrimitiveType::Boolean => "BOOLEAN",
            PrimitiveType::List    => "LIST"
        }
    }

    /// Find the primitive type a global dictionary name stands for.
    pub fn from_name(name: &str) -> Option<PrimitiveType>
    {
        PrimitiveType::ALL.iter().find(|primitive| primitive.name() == name).copied()
    }

    /// The value bound to the type's global entry.
    pub fn default_value(&self) -> Value
    {
        match self
        {
            PrimitiveType::Integer => Value::Integer(0),
            PrimitiveType::Float   => Value::Float(0.0),
            PrimitiveType::String  => Value::Str(String::new()),
            PrimitiveType::Boolean => Value::Boolean(false),
            PrimitiveType::List    => Value::List(Vec::new())
        }
    }
}


impl Display for PrimitiveType
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self.name())
    }
}



/// Everything the operand stack can hold.  Words are classified once, when they enter the
/// interpreter, so later code matches on the variant instead of parsing text again.
///
/// `Word` holds a bare word that is not a literal of any primitive type.  It is resolved against
/// the current scope whenever its value is needed.
#[derive(Clone, PartialEq, Debug)]
pub enum Value
{
    Integer(i64),

    /// Always printed with a fractional part so the text classifies as a float again.
    Float(f64),

    /// The text between the quotes.
    Str(String),

    Boolean(bool),

    /// Compared by content.  Produced only by the list compiler and the primitives.
    List(Vec<Value>),

    Word(String)
}


/// Plain decimal notation with at least one fractional digit, so the text classifies as a float
/// again.  Infinities and NaN have no such spelling and print as Rust does.
fn write_float(f: &mut Formatter, value: f64) -> fmt::Result
{
    let text = value.to_string();

    if value.is_finite() && !text.contains('.')
    {
        write!(f, "{}.0", text)
    }
    else
    {
        write!(f, "{}", text)
    }
}


impl Display for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value)   => write_float(f, *value),
            Value::Str(value)     => write!(f, "'{}'", value),
            Value::Boolean(value) => write!(f, "{}", if *value { TRUE_WORD } else { FALSE_WORD }),
            Value::Word(value)    => write!(f, "{}", value),
            Value::List(items)    =>
                {
                    write!(f, "(")?;

                    for item in items.iter()
                    {
                        write!(f, " {}", item)?;
                    }

                    write!(f, " )")
                }
        }
    }
}


/// Generate the typed accessors and conversions for the variants holding plain data.
macro_rules! value_conversion
{
    ($data_type:ty , $variant:ident , $as_ident:ident , $type_name:literal , $kind:ident) =>
    {
        impl Value
        {
            #[doc = concat!("Borrow the ", stringify!($data_type), " held by a ", $type_name,
                            " value, or fail with a script error.")]
            pub fn $as_ident(&self, interpreter: &dyn Interpreter) -> error::Result<&$data_type>
            {
                match self
                {
                    Value::$variant(value) => Ok(value),
                    _ => script_error(interpreter,
                                      ErrorKind::$kind,
                                      format!("Expected {} value, found {}.", $type_name, self))
                }
            }
        }


        impl From<$data_type> for Value
        {
            fn from(original: $data_type) -> Value
            {
                Value::$variant(original)
            }
        }
    };
}


value_conversion!(i64,        Integer, as_integer, "INTEGER", TypeMismatch);
value_conversion!(f64,        Float,   as_float,   "FLOAT",   TypeMismatch);
value_conversion!(bool,       Boolean, as_boolean, "BOOLEAN", NotBoolean);
value_conversion!(Vec<Value>, List,    as_list,    "LIST",    TypeMismatch);


impl From<usize> for Value
{
    fn from(original: usize) -> Value
    {
        Value::Integer(original as i64)
    }
}


impl Value
{
    /// Turn a word of source text into a value.  The checks run in a fixed order, integer, float,
    /// boolean, then string, and the first one to succeed decides.  Anything left is a bare word.
    pub fn classify(text: &str) -> Value
    {
        if let Ok(integer) = text.parse::<i64>()
        {
            Value::Integer(integer)
        }
        else if let Some(float) = Value::parse_float(text)
        {
            Value::Float(float)
        }
        else if text == TRUE_WORD
        {
            Value::Boolean(true)
        }
        else if text == FALSE_WORD
        {
            Value::Boolean(false)
        }
        else if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'')
        {
            Value::Str(text[1..text.len() - 1].to_string())
        }
        else
        {
            Value::Word(text.to_string())
        }
    }

    /// Words like "inf" or "NaN" parse as floats in Rust but are words in Kriek.
    fn parse_float(text: &str) -> Option<f64>
    {
        if !text.chars().any(|c| c.is_ascii_digit())
        {
            return None;
        }

        text.parse::<f64>().ok()
    }

    /// The primitive type of a literal value.  Bare words have none until resolved.
    pub fn primitive_type(&self) -> Option<PrimitiveType>
    {
        match self
        {
            Value::Integer(_) => Some(PrimitiveType::Integer),
            Value::Float(_)   => Some(PrimitiveType::Float),
            Value::Str(_)     => Some(PrimitiveType::String),
            Value::Boolean(_) => Some(PrimitiveType::Boolean),
            Value::List(_)    => Some(PrimitiveType::List),
            Value::Word(_)    => None
        }
    }

    /// The text of a bare word.
    pub fn as_word(&self) -> Option<&str>
    {
        match self
        {
            Value::Word(word) => Some(word),
            _ => None
        }
    }

    /// Borrow the text of a STRING value.
    pub fn as_string(&self, interpreter: &dyn Interpreter) -> error::Result<&String>
    {
        match self
        {
            Value::Str(value) => Ok(value),
            _ => script_error(interpreter,
                              ErrorKind::TypeMismatch,
                              format!("Expected STRING value, found {}.", self))
        }
    }

    /// The dictionary key for a value.  Every value, lists included, is keyed by its source
    /// spelling, so structurally equal values share a key.
    pub fn key(&self) -> String
    {
        self.to_string()
    }

    /// Read a numeric value as a float.  Integers are widened.
    pub fn as_number(&self, interpreter: &dyn Interpreter) -> error::Result<f64>
    {
        match self
        {
            Value::Integer(value) => Ok(*value as f64),
            Value::Float(value)   => Ok(*value),
            _ => script_error(interpreter,
                              ErrorKind::TypeMismatch,
                              format!("Expected numeric value, found {}.", self))
        }
    }
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn classification_order()
    {
        assert_eq!(Value::classify("10"), Value::Integer(10));
        assert_eq!(Value::classify("-3"), Value::Integer(-3));
        assert_eq!(Value::classify("10.0"), Value::Float(10.0));
        assert_eq!(Value::classify("1e3"), Value::Float(1000.0));
        assert_eq!(Value::classify("YES"), Value::Boolean(true));
        assert_eq!(Value::classify("NO"), Value::Boolean(false));
        assert_eq!(Value::classify("'a b'"), Value::Str("a b".to_string()));
        assert_eq!(Value::classify("''"), Value::Str(String::new()));
        assert_eq!(Value::classify("'"), Value::Word("'".to_string()));
        assert_eq!(Value::classify("yes"), Value::Word("yes".to_string()));
    }

    #[test]
    fn float_spellings_without_digits_are_words()
    {
        assert_eq!(Value::classify("inf"), Value::Word("inf".to_string()));
        assert_eq!(Value::classify("NaN"), Value::Word("NaN".to_string()));
    }

    #[test]
    fn integers_beyond_range_become_floats()
    {
        let value = Value::classify("99999999999999999999");

        assert_eq!(value, Value::Float(1e20));
        assert_eq!(value.to_string(), "100000000000000000000.0");
        assert_eq!(Value::classify(&value.to_string()), value);
    }

    #[test]
    fn floats_always_print_a_fraction()
    {
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(-0.25).to_string(), "-0.25");
        assert_eq!(Value::Float(1e-7).to_string(), "0.0000001");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn display_round_trips_through_classify()
    {
        for text in [ "42", "2.5", "3.0", "YES", "'hi there'", "WORD" ]
        {
            assert_eq!(Value::classify(text).to_string(), text);
        }

        let list = Value::List(vec![ Value::Integer(1), Value::Word("X".to_string()) ]);
        assert_eq!(list.to_string(), "( 1 X )");
    }

    #[test]
    fn primitive_types_by_name()
    {
        for primitive in PrimitiveType::ALL
        {
            assert_eq!(PrimitiveType::from_name(primitive.name()), Some(primitive));
            assert_eq!(primitive.default_value().primitive_type(), Some(primitive));
        }

        assert_eq!(PrimitiveType::from_name("WORD"), None);
        assert_eq!(Value::Word("X".to_string()).primitive_type(), None);
    }
}
