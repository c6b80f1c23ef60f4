use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One training record: raw issue text and the Markdown document written for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub input: String,
    pub output: String,
}

impl TrainingExample {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Read a JSON array of `{"input": ..., "output": ...}` records
pub fn read_examples<R: Read>(reader: R) -> Result<Vec<TrainingExample>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write examples as a pretty-printed JSON array
pub fn write_examples<W: Write>(writer: W, examples: &[TrainingExample]) -> Result<()> {
    serde_json::to_writer_pretty(writer, examples)?;
    Ok(())
}

/// Split into parallel input and output lists
pub fn into_pairs(examples: Vec<TrainingExample>) -> (Vec<String>, Vec<String>) {
    examples.into_iter().map(|ex| (ex.input, ex.output)).unzip()
}

/// Split off a validation tail. The first `floor(len * train_ratio)` records
/// train, the rest validate; order is kept.
pub fn split_examples(
    mut examples: Vec<TrainingExample>,
    train_ratio: f64,
) -> (Vec<TrainingExample>, Vec<TrainingExample>) {
    let ratio = train_ratio.clamp(0.0, 1.0);
    let cut = ((examples.len() as f64) * ratio).floor() as usize;
    let validation = examples.split_off(cut.min(examples.len()));
    (examples, validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples(n: usize) -> Vec<TrainingExample> {
        (0..n).map(|i| TrainingExample::new(format!("in{i}"), format!("out{i}"))).collect()
    }

    #[test]
    fn json_round_trip() {
        let mut buf = Vec::new();
        write_examples(&mut buf, &examples(2)).unwrap();
        assert_eq!(read_examples(buf.as_slice()).unwrap(), examples(2));
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = read_examples(r#"[{"input": "only input"}]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, crate::error::TemplaterError::Dataset(_)));
    }

    #[test]
    fn split_keeps_order() {
        let (train, val) = split_examples(examples(10), 0.9);
        assert_eq!(train.len(), 9);
        assert_eq!(val, vec![TrainingExample::new("in9", "out9")]);

        let (train, val) = split_examples(examples(3), 0.5);
        assert_eq!((train.len(), val.len()), (1, 2));

        let (train, val) = split_examples(examples(3), 1.0);
        assert_eq!((train.len(), val.len()), (3, 0));
    }

    #[test]
    fn pairs_are_parallel() {
        let (inputs, outputs) = into_pairs(examples(2));
        assert_eq!(inputs, vec!["in0", "in1"]);
        assert_eq!(outputs, vec!["out0", "out1"]);
    }
}
