//! The interactive command surface: an enumerated command kind with
//! alias-aware parsing and a single dispatch match. Handlers report local
//! failures as diagnostics and never tear down the loop; only `exit`/`quit`
//! end the session, via [`Outcome::Exit`].

use std::io::{self, Write as _};
use std::process;

use serde_json::Value;

use crate::cast::smart_cast;
use crate::error::{Error, Result};
use crate::fs;
use crate::navigator::Navigator;
use crate::value::{self, kind_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Append,
    Backup,
    Cast,
    Cd,
    Clear,
    DelKey,
    DelVal,
    Exit,
    Flag,
    Help,
    List,
    Print,
    Restart,
    Save,
    Set,
    Shell,
    TempLiteral,
    Uncast,
}

impl Command {
    pub fn parse(token: &str) -> Option<Command> {
        Some(match token {
            "append" => Self::Append,
            "backup" => Self::Backup,
            "cast" => Self::Cast,
            "cd" => Self::Cd,
            "cls" | "clear" => Self::Clear,
            "del-key" => Self::DelKey,
            "del-val" => Self::DelVal,
            "exit" | "quit" => Self::Exit,
            "flag" => Self::Flag,
            "help" => Self::Help,
            "ls" | "list" => Self::List,
            "print" => Self::Print,
            "restart" => Self::Restart,
            "save" => Self::Save,
            "set" => Self::Set,
            "!" => Self::Shell,
            "+l" => Self::TempLiteral,
            "uncast" => Self::Uncast,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Tokenize one input line and run it. Empty lines are a no-op.
pub fn dispatch(nav: &mut Navigator, line: &str) -> Outcome {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Outcome::Continue;
    };
    let args: Vec<&str> = tokens.collect();
    match Command::parse(head) {
        Some(cmd) => run(nav, cmd, &args),
        None => {
            eprintln!("error: unrecognized command `{head}` (try `help`)");
            Outcome::Continue
        }
    }
}

pub fn run(nav: &mut Navigator, cmd: Command, args: &[&str]) -> Outcome {
    match cmd {
        Command::Append => append(nav, args),
        Command::Backup => backup(nav),
        Command::Cast => recast(nav, args, CastMode::Infer),
        Command::Cd => cd(nav, args),
        Command::Clear => clear_screen(),
        Command::DelKey => del_key(nav, args),
        Command::DelVal => del_val(nav, args),
        Command::Exit => return Outcome::Exit,
        Command::Flag => flag(nav, args),
        Command::Help => println!("{HELP}"),
        Command::List => show_current(nav),
        Command::Print => print_public(nav, args),
        Command::Restart => restart(nav),
        Command::Save => save(nav),
        Command::Set => set_value(nav, args),
        Command::Shell => shell_escape(args),
        Command::TempLiteral => return temporary_literal(nav, args),
        Command::Uncast => recast(nav, args, CastMode::Stringify),
    }
    Outcome::Continue
}

const HELP: &str = "\
commands:
  cd <path>           move the working address (`..` up, `/` root)
  ls | list           print the node at the working address
  set <value>         replace the current node (smart-cast in literal mode)
  append <value>      merge/concatenate/sum into the current node
  del-key <k>...      delete keys or indices from the current container
  del-val <v>...      delete entries of the current container by value
  cast <path>         re-infer the type of the node (`.` = current)
  uncast <path>       stringify the node (`.` = current)
  flag <name> on|off  toggle a boolean session flag
  print [name]...     show session state (data, filename, literal, path)
  restart             reload the document from its file
  save                write the document back to its file
  backup              zip the document file next to itself
  +l <cmd> [args]     run one command with literal mode forced on
  ! <cmd> [args]      run a host shell command
  cls | clear         clear the screen
  exit | quit         leave the editor";

/// Combine `input` into `target`: objects merge (new keys win), arrays
/// concatenate, number/string scalars concatenate as text when either side
/// is textual and sum numerically otherwise. Every other pairing is an
/// [`Error::Append`].
pub fn append_values(target: Value, input: Value) -> Result<Value> {
    match (target, input) {
        (Value::Object(mut cur), Value::Object(new)) => {
            for (k, v) in new {
                cur.insert(k, v);
            }
            Ok(Value::Object(cur))
        }
        (Value::Array(mut cur), Value::Array(mut new)) => {
            cur.append(&mut new);
            Ok(Value::Array(cur))
        }
        (cur, new) if value::is_summable_scalar(&cur) && value::is_summable_scalar(&new) => {
            if cur.is_string() || new.is_string() {
                return Ok(Value::String(format!(
                    "{}{}",
                    value::scalar_text(&cur),
                    value::scalar_text(&new)
                )));
            }
            if let (Some(a), Some(b)) = (cur.as_i64(), new.as_i64())
                && let Some(sum) = a.checked_add(b)
            {
                return Ok(Value::Number(sum.into()));
            }
            cur.as_f64()
                .zip(new.as_f64())
                .and_then(|(a, b)| serde_json::Number::from_f64(a + b))
                .map(Value::Number)
                .ok_or(Error::Append {
                    target: kind_of(&cur),
                    input: kind_of(&new),
                })
        }
        (cur, new) => Err(Error::Append {
            target: kind_of(&cur),
            input: kind_of(&new),
        }),
    }
}

/// Drop every entry of an object or array whose value equals `target`.
/// None when the node has no entries to filter.
pub fn remove_matching(container: Value, target: &Value) -> Option<Value> {
    match container {
        Value::Object(map) => Some(Value::Object(
            map.into_iter().filter(|(_, v)| v != target).collect(),
        )),
        Value::Array(items) => Some(Value::Array(
            items.into_iter().filter(|v| v != target).collect(),
        )),
        _ => None,
    }
}

fn show_current(nav: &Navigator) {
    match nav.current() {
        Ok(v) => println!("{}", value::pretty(v)),
        Err(e) => eprintln!("error: {e}"),
    }
}

fn cd(nav: &mut Navigator, args: &[&str]) {
    if args.is_empty() {
        println!("usage: cd <path>");
        return;
    }
    let mut segments: Vec<&str> = Vec::new();
    for arg in args {
        if arg.starts_with('/') || arg.starts_with('\\') {
            segments.push("/");
        }
        segments.extend(arg.split(['/', '\\']).filter(|s| !s.is_empty()));
    }
    // Each segment is validated against wherever the previous one landed;
    // a bad segment is reported and the walk moves on to the next.
    for seg in segments {
        if let Err(e) = nav.step(seg) {
            eprintln!("error: {e}");
        }
    }
    show_current(nav);
}

fn set_value(nav: &mut Navigator, args: &[&str]) {
    if args.is_empty() {
        println!("usage: set <value>");
        return;
    }
    match nav.set_current(&args.join(" "), false) {
        Ok(()) => show_current(nav),
        Err(e) => eprintln!("error: {e}"),
    }
}

fn append(nav: &mut Navigator, args: &[&str]) {
    if args.is_empty() {
        println!("usage: append <value>");
        return;
    }
    let input = smart_cast(&args.join(" "));
    let target = match nav.current() {
        Ok(v) => v.clone(),
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };
    match append_values(target, input) {
        Ok(merged) => {
            if let Err(e) = nav.set_current_value(merged) {
                eprintln!("error: {e}");
            }
        }
        Err(e) => eprintln!("error: {e}"),
    }
}

fn del_key(nav: &mut Navigator, args: &[&str]) {
    if args.is_empty() {
        println!("usage: del-key <key-or-index>...");
        return;
    }
    for key in args {
        let current = match nav.current() {
            Ok(v) => v.clone(),
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        };
        let next = match current {
            Value::Object(mut map) => {
                if map.shift_remove(*key).is_none() {
                    eprintln!("error: no key `{key}` in current object");
                    continue;
                }
                Value::Object(map)
            }
            Value::Array(mut items) => match key.parse::<usize>() {
                Ok(i) if i < items.len() => {
                    items.remove(i);
                    Value::Array(items)
                }
                _ => {
                    eprintln!("error: no index `{key}` in current array");
                    continue;
                }
            },
            other => {
                eprintln!("error: cannot del-key from {}", kind_of(&other));
                return;
            }
        };
        if let Err(e) = nav.set_current_value(next) {
            eprintln!("error: {e}");
            return;
        }
    }
}

fn del_val(nav: &mut Navigator, args: &[&str]) {
    if args.is_empty() {
        println!("usage: del-val <value>...");
        return;
    }
    for raw in args {
        let target = if nav.literal() {
            smart_cast(raw)
        } else {
            Value::String(raw.to_string())
        };
        let current = match nav.current() {
            Ok(v) => v.clone(),
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        };
        let Some(next) = remove_matching(current, &target) else {
            eprintln!("error: can only del-val from an object or array");
            continue;
        };
        if let Err(e) = nav.set_current_value(next) {
            eprintln!("error: {e}");
            return;
        }
    }
}

enum CastMode {
    Infer,
    Stringify,
}

fn recast(nav: &mut Navigator, args: &[&str], mode: CastMode) {
    let [target] = args else {
        match mode {
            CastMode::Infer => println!("usage: cast <path>"),
            CastMode::Stringify => println!("usage: uncast <path>"),
        }
        return;
    };
    let addr = nav.relative(target);
    let node = match nav.get_at(&addr) {
        Ok(v) => v.clone(),
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };
    let next = match mode {
        // Only strings carry latent type information; everything else is
        // already as narrow as it gets.
        CastMode::Infer => match node {
            Value::String(s) => smart_cast(&s),
            other => other,
        },
        CastMode::Stringify => Value::String(value::scalar_text(&node)),
    };
    if let Err(e) = nav.set_at(&addr, next) {
        eprintln!("error: {e}");
    }
}

fn flag(nav: &mut Navigator, args: &[&str]) {
    let [name, state] = args else {
        println!("usage: flag <name> <on|off>");
        return;
    };
    let state = match *state {
        "on" => true,
        "off" => false,
        _ => {
            println!("usage: flag <name> <on|off>");
            return;
        }
    };
    if let Err(e) = nav.set_flag(name, state) {
        eprintln!("error: {e}");
    }
}

fn print_public(nav: &Navigator, args: &[&str]) {
    let vars = nav.public();
    if args.is_empty() {
        let names: Vec<&str> = vars.iter().map(|(n, _)| *n).collect();
        println!("available variables: {}", names.join(", "));
        return;
    }
    for name in args {
        match vars.iter().find(|(n, _)| n == name) {
            Some((n, v)) => println!("{n}: {v}"),
            None => println!("{name}: variable not found"),
        }
    }
}

fn restart(nav: &mut Navigator) {
    match fs::load(nav.file_name()) {
        Ok(doc) => {
            nav.replace_doc(doc);
            show_current(nav);
        }
        Err(e) => eprintln!("error: {e}"),
    }
}

fn save(nav: &Navigator) {
    match fs::save(nav.file_name(), nav.doc()) {
        Ok(()) => println!("saved {}", nav.file_name().display()),
        Err(e) => eprintln!("error: {e}"),
    }
}

fn backup(nav: &Navigator) {
    match fs::backup_file(nav.file_name()) {
        Ok(dest) => println!("backup written to {}", dest.display()),
        Err(e) => eprintln!("error: {e}"),
    }
}

fn temporary_literal(nav: &mut Navigator, args: &[&str]) -> Outcome {
    let Some((head, rest)) = args.split_first() else {
        println!("usage: +l <command> [args]");
        return Outcome::Continue;
    };
    let Some(cmd) = Command::parse(head) else {
        eprintln!("error: unrecognized command `{head}`");
        return Outcome::Continue;
    };
    let saved = nav.literal();
    nav.set_flag("literal", true).ok();
    let outcome = run(nav, cmd, rest);
    nav.set_flag("literal", saved).ok();
    outcome
}

fn shell_escape(args: &[&str]) {
    if args.is_empty() {
        println!("usage: ! <command>");
        return;
    }
    let joined = args.join(" ");
    #[cfg(windows)]
    let status = process::Command::new("cmd").args(["/C", &joined]).status();
    #[cfg(not(windows))]
    let status = process::Command::new("sh").args(["-c", &joined]).status();
    if let Err(e) = status {
        eprintln!("error: {e}");
    }
}

fn clear_screen() {
    print!("\x1b[2J\x1b[1;1H");
    io::stdout().flush().ok();
}
