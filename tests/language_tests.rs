// Table driven tests of the Kriek language surface, run in-process against the library with the
// standard lexicon loaded.

use kriek::runtime::built_ins::register_primitive_messages;
use kriek::runtime::error::{ErrorKind, Result};
use kriek::runtime::interpreter::kriek_interpreter::KriekInterpreter;
use kriek::runtime::interpreter::{CodeManagement, InterpreterStack};
use std::path::Path;
use test_case::test_case;

fn eval_to_stack(source: &str) -> Result<String> {
    let mut interp = KriekInterpreter::new();
    register_primitive_messages(&mut interp);

    let lexicon = Path::new(env!("CARGO_MANIFEST_DIR")).join("lexicon/essential.kr");
    interp.process_source_file(lexicon.to_str().unwrap()).unwrap();

    interp.process_source("<test>", source)?;

    let stack: Vec<String> = interp.stack().iter().map(|value| value.to_string()).collect();
    Ok(stack.join(" "))
}

#[test_case("", ""; "empty program")]
#[test_case("42", "42"; "integer literal")]
#[test_case("-7", "-7"; "negative integer literal")]
#[test_case("2.5", "2.5"; "float literal")]
#[test_case("YES NO", "YES NO"; "boolean literals")]
#[test_case("'hello world'", "'hello world'"; "string keeps whitespace")]
#[test_case("\"a comment\" 10 20", "10 20"; "comment is elided")]
#[test_case("( 1 2 3 )", "( 1 2 3 )"; "list literal")]
#[test_case("( 1 ( 2 3 ) )", "( 1 ( 2 3 ) )"; "nested list literal")]
#[test_case("( )", "( )"; "empty list")]
#[test_case("HELLO", "HELLO"; "bare word is pushed")]
#[test_case("10 20 + !", "30"; "integer add")]
#[test_case("10 20 - !", "10"; "integer subtract")]
#[test_case("3 4 * !", "12"; "integer multiply")]
#[test_case("2 7 / !", "3"; "integer divide")]
#[test_case("-2 7 / !", "-4"; "integer divide rounds down")]
#[test_case("3 7 % !", "1"; "integer modulo")]
#[test_case("3 -7 % !", "2"; "integer modulo of negative receiver")]
#[test_case("3 5 > !", "YES"; "integer greater")]
#[test_case("5 3 > !", "NO"; "integer not greater")]
#[test_case("5 5 = !", "YES"; "integer equal")]
#[test_case("1.5 1.5 + !", "3.0"; "float add keeps fraction")]
#[test_case("1 2.5 - !", "1.5"; "float subtract widens integer argument")]
#[test_case("2 1.0 / !", "0.5"; "float divide")]
#[test_case("0.5 1.5 > !", "YES"; "float greater")]
#[test_case("YES NO AND !", "NO"; "boolean and")]
#[test_case("YES NO OR !", "YES"; "boolean or")]
#[test_case("NO NOT !", "YES"; "boolean not")]
#[test_case("NO NO = !", "YES"; "boolean equal")]
#[test_case("( 1 ) YES IF !", "1"; "if runs block")]
#[test_case("( 1 ) NO IF !", ""; "if skips block")]
#[test_case("( 1 ) ( 2 ) YES IF-ELSE !", "1"; "if else yes branch")]
#[test_case("( 1 ) ( 2 ) NO IF-ELSE !", "2"; "if else no branch")]
#[test_case("( 1 2 3 ) SIZE !", "3"; "list size")]
#[test_case("( 1 2 + ! ) DO !", "3"; "list do")]
#[test_case("'hello' SIZE !", "5"; "string size")]
#[test_case("'abc' 'abc' = !", "YES"; "string equal")]
#[test_case("10 5 < !", "YES"; "lexicon less")]
#[test_case("5 10 < !", "NO"; "lexicon not less")]
#[test_case("5 5 <= !", "YES"; "lexicon at most")]
#[test_case("4 5 >= !", "YES"; "lexicon at least")]
#[test_case("4 5 != !", "YES"; "lexicon integer different")]
#[test_case("1.5 0.5 < !", "YES"; "lexicon float less")]
#[test_case("'a' 'b' != !", "YES"; "lexicon string different")]
#[test_case("1 \\d", "1 1"; "duplicate")]
#[test_case("1 2 \\s", "2 1"; "swap")]
#[test_case("1 2 \\r", "1"; "remove")]
#[test_case("1 2 3 1 \\c", "1 2 3 2"; "copy at depth")]
#[test_case("1 2 3 0 \\c", "1 2 3 3"; "copy top")]
#[test_case("1 2 3 1 \\e", "1 3 2"; "extract at depth")]
#[test_case("1 2 3 2 \\e", "2 3 1"; "extract bottom")]
#[test_case("10 X @ X ,", "10"; "bind then dereference")]
#[test_case("10 X @ X Y @ Y ,", "10"; "bind copies the value of a word")]
#[test_case("1 X @ 2 X @ X ,", "2"; "rebinding replaces the value")]
#[test_case("[ 1 + ! ] INC 5 INC", "6"; "alias expands")]
#[test_case("[ 1 ] ONE [ ONE ONE ] TWO TWO", "1 1"; "alias body uses earlier alias")]
#[test_case("[ SELF ] SELF SELF", "SELF"; "alias is not expanded recursively")]
fn program_leaves_stack(source: &str, expected: &str) {
    assert_eq!(eval_to_stack(source).unwrap(), expected);
}

#[test_case("!", ErrorKind::StackUnderflow; "send on empty stack")]
#[test_case("\\d", ErrorKind::StackUnderflow; "duplicate on empty stack")]
#[test_case("FOO BAR !", ErrorKind::UnboundWord; "unbound receiver")]
#[test_case("1 FOO !", ErrorKind::UnknownMessage; "unknown message for integer")]
#[test_case("( 1 2", ErrorKind::Unterminated; "unterminated list")]
#[test_case(")", ErrorKind::Malformed; "unmatched list close")]
#[test_case("'abc", ErrorKind::Unterminated; "unterminated string")]
#[test_case("\"abc", ErrorKind::Unterminated; "unterminated comment")]
#[test_case("[ 1 2", ErrorKind::Unterminated; "unterminated alias")]
#[test_case("1 ]", ErrorKind::Malformed; "stray alias close")]
#[test_case("~", ErrorKind::ScopeUnderflow; "leaving the global scope")]
#[test_case("X :", ErrorKind::UnboundWord; "entering an unbound word")]
#[test_case(".", ErrorKind::NoReceiver; "self reference outside a message")]
#[test_case("UNBOUND ,", ErrorKind::UnboundWord; "dereferencing an unbound word")]
#[test_case("5 UNBOUND X @", ErrorKind::UnboundWord; "binding an unbound value")]
#[test_case("1 2 5 \\c", ErrorKind::BadIndex; "copy out of range")]
#[test_case("1 2 -1 \\e", ErrorKind::BadIndex; "extract negative index")]
#[test_case("1 2 'x' \\c", ErrorKind::BadIndex; "copy with string index")]
#[test_case("1 2 2.0 \\e", ErrorKind::BadIndex; "extract with float index")]
#[test_case("0 1 / !", ErrorKind::Arithmetic; "integer division by zero")]
#[test_case("0 1 % !", ErrorKind::Arithmetic; "integer modulo by zero")]
#[test_case("0 1.0 / !", ErrorKind::Arithmetic; "float division by zero")]
#[test_case("1 9223372036854775807 + !", ErrorKind::Arithmetic; "integer overflow")]
#[test_case("1.5 2 + !", ErrorKind::TypeMismatch; "float argument to integer message")]
#[test_case("'x' 2 + !", ErrorKind::TypeMismatch; "string argument to integer message")]
#[test_case("'x' 1.5 + !", ErrorKind::TypeMismatch; "string argument to float message")]
#[test_case("1 YES AND !", ErrorKind::NotBoolean; "integer argument to boolean message")]
#[test_case("1 YES IF !", ErrorKind::TypeMismatch; "integer block for if")]
#[test_case("( 1 ) ( ) WHILE !", ErrorKind::NotBoolean; "while condition not boolean")]
#[test_case("5 INTEGER @", ErrorKind::ProtectedWord; "rebinding a primitive type")]
fn program_fails(source: &str, kind: ErrorKind) {
    let error = eval_to_stack(source).unwrap_err();
    assert_eq!(error.kind(), kind, "{}", error);
}
