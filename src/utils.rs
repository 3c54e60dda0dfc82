use std::io::Write;

/// Serialize records as delimited text with a header row.
pub fn write_csv<I, R, W>(records: I, writer: W, delimiter: u8) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: Write,
{
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    for record in records.into_iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Signed percentage with two decimals, e.g. `+4.76`
pub fn format_pct(value: f64) -> String {
    format!("{:+.2}", value)
}

pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_index(value: f64) -> String {
    format!("{:.4}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InflationRateRecord;

    #[test]
    fn writes_header_and_rows_with_delimiter() {
        let rates = vec![
            InflationRateRecord {
                year: 2021,
                rate: 0.031,
            },
            InflationRateRecord {
                year: 2022,
                rate: 0.134,
            },
        ];
        let mut out = Vec::new();
        write_csv(&rates, &mut out, b';').unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "year;rate\n2021;0.031\n2022;0.134\n"
        );
    }

    #[test]
    fn formats() {
        assert_eq!(format_pct(4.7619), "+4.76");
        assert_eq!(format_pct(-0.5), "-0.50");
        assert_eq!(format_amount(10.194), "10.19");
        assert_eq!(format_index(1.047619), "1.0476");
    }
}
