// crates/gauss-cli/src/io/dataset.rs
//
// Labeled feature table, one record per line:
//   f1,f2,...,fD,label
// Blank lines and lines starting with '#' are skipped. Every record must
// carry the same D (>= 1), and every feature must be finite.

use std::path::Path;

use anyhow::{Context, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub features: Vec<f64>,
    pub label: String,
}

pub fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read dataset {}", path.display()))?;
    parse_csv(&text).with_context(|| format!("parse dataset {}", path.display()))
}

pub fn parse_csv(text: &str) -> Result<Vec<Record>> {
    let mut out: Vec<Record> = Vec::new();

    for (ix, raw) in text.lines().enumerate() {
        let line_no = ix + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let Some((label, values)) = fields.split_last() else {
            continue;
        };
        if values.is_empty() {
            anyhow::bail!("line {}: need at least one feature before the label", line_no);
        }

        let features = values
            .iter()
            .map(|v| -> Result<f64> {
                let x = v
                    .parse::<f64>()
                    .with_context(|| format!("line {}: bad feature {:?}", line_no, v))?;
                if !x.is_finite() {
                    anyhow::bail!("line {}: feature {:?} is not finite", line_no, v);
                }
                Ok(x)
            })
            .collect::<Result<Vec<f64>>>()?;

        if let Some(first) = out.first() {
            if first.features.len() != features.len() {
                anyhow::bail!(
                    "line {}: {} features, expected {}",
                    line_no,
                    features.len(),
                    first.features.len()
                );
            }
        }

        out.push(Record {
            features,
            label: label.to_string(),
        });
    }

    if out.is_empty() {
        anyhow::bail!("dataset has no records");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_and_skips_comments() {
        let text = "# sepal,petal\n5.1,3.5,1.4,0.2,setosa\n\n7.0,3.2,4.7,1.4,versicolor\n";
        let rows = parse_csv(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].features, vec![5.1, 3.5, 1.4, 0.2]);
        assert_eq!(rows[1].label, "versicolor");
    }

    #[test]
    fn ragged_rows_fail() {
        assert!(parse_csv("1,2,a\n1,b\n").is_err());
    }

    #[test]
    fn non_numeric_feature_fails() {
        let err = parse_csv("1,x,a\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 1"));
    }

    #[test]
    fn non_finite_features_fail_with_their_line() {
        for bad in ["NaN", "inf", "-inf"] {
            let text = format!("1,2,a\n3,{},b\n", bad);
            let err = parse_csv(&text).unwrap_err();
            let msg = format!("{:#}", err);
            assert!(msg.contains("line 2") && msg.contains("not finite"), "{}", msg);
        }
    }

    #[test]
    fn empty_input_fails() {
        assert!(parse_csv("# nothing\n\n").is_err());
    }
}
