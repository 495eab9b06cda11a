use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Logging sink used by the driver and commands.
///
/// Abstracted as a trait so the driver can be exercised in tests with a
/// recording implementation instead of writing to the terminal.
pub trait Log: Send + Sync {
    fn error(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn stage(&self, msg: &str);
    fn info(&self, msg: &str);
    fn debug(&self, msg: &str);
    fn dry_run(&self, msg: &str);
}

/// Terminal logger with dry-run awareness and a persistent file log.
///
/// All messages are always written to `$XDG_CACHE_HOME/provision/provision.log`
/// (default `~/.cache/provision/provision.log`) with timestamps and ANSI codes
/// stripped, regardless of the verbose flag.
pub struct Logger {
    verbose: bool,
    log_file: Option<PathBuf>,
}

/// Return the log file path under `$XDG_CACHE_HOME/provision/` (or `~/.cache/provision/`).
fn log_file_path() -> Option<PathBuf> {
    let cache_dir = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".cache")
        });
    let dir = cache_dir.join("provision");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("provision.log"))
}

/// Strip ANSI escape sequences from a string.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of SGR sequence)
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl Logger {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        let log_file = log_file_path();

        // Truncate and write header (new run = fresh log)
        if let Some(ref path) = log_file {
            let version = option_env!("PROVISION_VERSION")
                .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
            let header = format!(
                "==========================================\n\
                 Provision {version} {}\n\
                 ==========================================\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            );
            let _ = fs::write(path, header);
        }

        Self { verbose, log_file }
    }

    /// Append a line to the persistent log file.
    fn write_to_file(&self, level: &str, msg: &str) {
        if let Some(ref path) = self.log_file
            && let Ok(mut f) = fs::OpenOptions::new().append(true).open(path)
        {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let clean = strip_ansi(msg);
            let _ = writeln!(f, "{ts} {level} {clean}");
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Build a logger writing to an explicit file, isolated from the shared
    /// cache path. Test binaries run in parallel and would otherwise race on
    /// truncating the same log file.
    #[cfg(test)]
    pub fn with_file(verbose: bool, path: PathBuf) -> Self {
        let _ = fs::write(&path, "");
        Self {
            verbose,
            log_file: Some(path),
        }
    }
}

impl Log for Logger {
    fn error(&self, msg: &str) {
        eprintln!("\x1b[31mERROR\x1b[0m {msg}");
        self.write_to_file("ERR", msg);
    }

    fn warn(&self, msg: &str) {
        eprintln!("\x1b[33mWARN\x1b[0m  {msg}");
        self.write_to_file("WRN", msg);
    }

    fn stage(&self, msg: &str) {
        println!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m");
        self.write_to_file("STG", msg);
    }

    fn info(&self, msg: &str) {
        println!("  {msg}");
        self.write_to_file("INF", msg);
    }

    fn debug(&self, msg: &str) {
        if self.verbose {
            println!("  \x1b[2m{msg}\x1b[0m");
        }
        // Always log debug to file, even when not verbose on terminal
        self.write_to_file("DBG", msg);
    }

    fn dry_run(&self, msg: &str) {
        println!("  \x1b[33m[DRY RUN]\x1b[0m {msg}");
        self.write_to_file("DRY", msg);
    }
}
