use chainmail::HashTable;
use rustyline::{DefaultEditor, error::ReadlineError};

const PROMPT: &str = "chainmail > ";
const HISTORY: &str = "history.chsh";

const CHAINMAIL_ASCII: &str = r#"
  ()=()=()=()
  ()=()=()=()
  ()=()=()=()
"#;

fn main() -> rustyline::Result<()> {
    let mut rsl = DefaultEditor::new()?;
    if rsl.load_history(HISTORY).is_err() {
        println!("No previous history")
    };

    println!("{CHAINMAIL_ASCII}");
    println!("chsh | chainmail's chain-link shell.");
    println!("Type help for guidance, quit to slip out of the armour.");

    let mut table: HashTable<String, String> = HashTable::new();

    loop {
        let line = match rsl.readline(PROMPT) {
            Ok(line) => line,
            Err(err) => {
                match err {
                    ReadlineError::Interrupted => println!("CTRL-C"),
                    ReadlineError::Eof => println!("CTRL-D"),
                    other => println!("Error: {other:#?}"),
                }

                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        rsl.add_history_entry(&line)?;

        if handle_command(&line, &mut table) {
            break;
        }
    }

    rsl.save_history(HISTORY)?;
    Ok(())
}

/// Runs a single command against the table. Returns `true` on `quit`.
fn handle_command(command: &str, table: &mut HashTable<String, String>) -> bool {
    let parts = command.split_whitespace().collect::<Vec<_>>();

    match parts.as_slice() {
        ["quit"] | ["q"] => return true,
        ["help"] | ["h"] | ["?"] => help(),
        ["put", key, value @ ..] if !value.is_empty() => {
            match table.put(key.to_string(), value.join(" ")) {
                Some(previous) => println!("{key} rewrote '{previous}'"),
                None => println!("{key} chained in"),
            }
        }
        ["get", key] => match table.get(*key) {
            Some(value) => println!("{value}"),
            None => println!("{key} is not chained in"),
        },
        ["del", key] => match table.remove(*key) {
            Some(value) => println!("{key} unlinked (held '{value}')"),
            None => println!("{key} is not chained in"),
        },
        ["has", key] => println!("{}", table.contains_key(*key)),
        ["holds", value @ ..] if !value.is_empty() => {
            println!("{}", table.contains_value(&value.join(" ")))
        }
        ["resize", capacity] => match capacity.parse::<isize>() {
            Ok(capacity) => match table.resize(capacity) {
                Ok(()) => println!("migrated to {capacity} buckets"),
                Err(err) => println!("{err}"),
            },
            Err(_) => println!("'{capacity}' is not a capacity"),
        },
        ["len"] => println!("{}", table.len()),
        ["cap"] => println!("{}", table.capacity()),
        ["load"] => println!("{:.3}", table.load_factor()),
        ["clear"] => {
            table.clear();
            println!("every chain dropped");
        }
        ["print"] => print!("{table}"),
        _ => println!("Unknown command: {command}"),
    }

    false
}

fn help() {
    println!("Available commands:");
    println!("  put <key> <value>   Chain a value in (rewrites duplicates)");
    println!("  get <key>           Look a value up");
    println!("  del <key>           Unlink an entry");
    println!("  has <key>           Key presence");
    println!("  holds <value>       Value presence, scanning every chain");
    println!("  resize <n>          Migrate to n buckets");
    println!("  len, cap, load      Entry count, bucket count, load factor");
    println!("  print               Dump the bucket layout");
    println!("  clear               Drop every chain");
    println!("  help, quit");
}
