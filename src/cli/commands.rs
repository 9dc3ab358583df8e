use std::path::{Path, PathBuf};

use clap::Parser;

use crate::io::data_dir::discover_data_dir;

#[derive(Parser, Debug)]
#[command(name = "jot", about = concat!("[x] jot v", env!("CARGO_PKG_VERSION"), " - a single-screen to-do list"), version)]
pub struct Cli {
    /// Keep tasks in this directory instead of the nearest .jot/
    #[arg(short = 'C', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Don't reload when another process changes the task file
    #[arg(long)]
    pub no_watch: bool,
}

impl Cli {
    /// The explicit `--data-dir`, or the one discovered from `cwd`
    pub fn resolve_data_dir(&self, cwd: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => discover_data_dir(cwd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["jot"]).unwrap();
        assert!(cli.data_dir.is_none());
        assert!(!cli.no_watch);
    }

    #[test]
    fn short_and_long_flags() {
        let cli = Cli::try_parse_from(["jot", "-C", "/tmp/tasks", "--no-watch"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/tasks")));
        assert!(cli.no_watch);

        let cli = Cli::try_parse_from(["jot", "--data-dir", "rel"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("rel")));
    }

    #[test]
    fn rejects_subcommands() {
        assert!(Cli::try_parse_from(["jot", "add", "milk"]).is_err());
    }

    #[test]
    fn relative_data_dir_is_joined_to_cwd() {
        let tmp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["jot", "-C", "store"]).unwrap();
        assert_eq!(cli.resolve_data_dir(tmp.path()), tmp.path().join("store"));
    }

    #[test]
    fn missing_flag_falls_back_to_discovery() {
        let tmp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["jot"]).unwrap();
        assert_eq!(cli.resolve_data_dir(tmp.path()), tmp.path().join(".jot"));
    }
}
