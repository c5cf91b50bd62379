use std::path::PathBuf;

use clap::Args;

use super::analyze::{inspect, load, reporter::Reporter};

#[derive(Debug, Clone, Args)]
pub(crate) struct InspectArg {
    /// Passenger CSV with the Kaggle Titanic train columns
    #[arg(long, default_value = "data/train.csv")]
    pub input: PathBuf,
    /// Rows printed per table; longer tables are truncated
    #[arg(long, default_value_t = 30)]
    pub max_table_rows: usize,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let mut reporter = Reporter::console(arg.max_table_rows);
    let table = load::run(&arg.input, &mut reporter)?;
    inspect::run(&table, &mut reporter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("train.csv");
        std::fs::write(&input, "Survived,Sex,Age\n0,male,22\n1,female,\n").unwrap();
        run(&InspectArg {
            input,
            max_table_rows: 30,
        })
        .unwrap();
        let entries = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 1, "only the input file");
    }
}
