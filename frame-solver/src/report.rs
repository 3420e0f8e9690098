//! Tabular text report of inputs and results
//!
//! Output goes through a [`ResultSink`], so a caller can route the report to
//! a terminal, a file or a widget without touching process streams.

use std::io::Write;

use crate::error::FrameResult;
use crate::parameters::{FrameParameters, ParameterName};
use crate::results::FrameSolution;
use crate::topology::{Member, DOFS_PER_NODE};

/// Heading level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Report section
    Section,
    /// Block within a section
    Subsection,
}

/// Receiver of labeled tabular output
pub trait ResultSink {
    /// Emit a heading
    fn heading(&mut self, level: HeadingLevel, text: &str) -> FrameResult<()>;

    /// Emit a numeric table, one value per header in each row
    fn table(&mut self, headers: &[&str], rows: &[Vec<f64>]) -> FrameResult<()>;
}

/// Plain text sink writing to any [`Write`]
///
/// Headings are underlined, values are right-aligned in scientific notation.
pub struct TextSink<W: Write> {
    writer: W,
    column_width: usize,
    precision: usize,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            column_width: 12,
            precision: 4,
        }
    }

    /// Set the number of digits after the decimal point
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self.column_width = precision + 8;
        self
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for TextSink<W> {
    fn heading(&mut self, level: HeadingLevel, text: &str) -> FrameResult<()> {
        let underline = match level {
            HeadingLevel::Section => '=',
            HeadingLevel::Subsection => '-',
        };
        writeln!(self.writer)?;
        writeln!(self.writer, "{text}")?;
        writeln!(
            self.writer,
            "{}",
            underline.to_string().repeat(text.chars().count())
        )?;
        Ok(())
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<f64>]) -> FrameResult<()> {
        let width = self.column_width;
        let precision = self.precision;

        let header_line: String = headers.iter().map(|h| format!("{h:>width$}")).collect();
        writeln!(self.writer, "{header_line}")?;

        for row in rows {
            let line: String = row
                .iter()
                .map(|v| format!("{v:>width$.precision$e}"))
                .collect();
            writeln!(self.writer, "{line}")?;
        }
        Ok(())
    }
}

/// Write the complete report: inputs, nodal results and member tables
pub fn write_report(
    params: &FrameParameters,
    solution: &FrameSolution,
    sink: &mut dyn ResultSink,
) -> FrameResult<()> {
    use ParameterName::*;

    sink.heading(HeadingLevel::Section, "Input parameters")?;
    for (title, names) in [
        ("Geometry", &[W, H][..]),
        ("Material", &[E, A1, A2, I1, I2][..]),
        ("Loads", &[Q1, Q2, Q3, F1][..]),
    ] {
        sink.heading(HeadingLevel::Subsection, title)?;
        let headers: Vec<&str> = names.iter().map(|n| n.key()).collect();
        let row: Vec<f64> = names.iter().map(|&n| params.get(n)).collect();
        sink.table(&headers, &[row])?;
    }

    sink.heading(HeadingLevel::Section, "Nodal displacements")?;
    let rows: Vec<Vec<f64>> = solution
        .displacements
        .chunks_exact(DOFS_PER_NODE)
        .map(<[f64]>::to_vec)
        .collect();
    sink.table(&["ux", "uy", "rz"], &rows)?;

    sink.heading(HeadingLevel::Section, "Support reactions")?;
    let labels: Vec<String> = solution
        .reactions
        .iter()
        .map(|r| format!("R{}", r.dof))
        .collect();
    let headers: Vec<&str> = labels.iter().map(String::as_str).collect();
    let row: Vec<f64> = solution.reactions.iter().map(|r| r.force).collect();
    sink.table(&headers, &[row])?;

    for member in Member::ALL {
        let result = solution.member(member);
        sink.heading(HeadingLevel::Section, &capitalize(&member.to_string()))?;

        sink.heading(HeadingLevel::Subsection, "Section forces")?;
        let rows: Vec<Vec<f64>> = result
            .samples
            .iter()
            .map(|s| vec![s.x, s.normal, s.shear, s.moment])
            .collect();
        sink.table(&["x", "N", "V", "M"], &rows)?;

        sink.heading(HeadingLevel::Subsection, "Displacements")?;
        let rows: Vec<Vec<f64>> = result
            .samples
            .iter()
            .map(|s| vec![s.x, s.axial_displacement, s.transverse_displacement])
            .collect();
        sink.table(&["x", "u", "v"], &rows)?;
    }

    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{solve, AnalysisOptions};

    /// Sink that records calls instead of formatting them
    #[derive(Default)]
    struct RecordingSink {
        headings: Vec<(HeadingLevel, String)>,
        tables: Vec<(Vec<String>, Vec<Vec<f64>>)>,
    }

    impl ResultSink for RecordingSink {
        fn heading(&mut self, level: HeadingLevel, text: &str) -> FrameResult<()> {
            self.headings.push((level, text.to_string()));
            Ok(())
        }

        fn table(&mut self, headers: &[&str], rows: &[Vec<f64>]) -> FrameResult<()> {
            let headers = headers.iter().map(|h| h.to_string()).collect();
            self.tables.push((headers, rows.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn test_text_sink_formatting() {
        let mut sink = TextSink::new(Vec::new());
        sink.heading(HeadingLevel::Section, "Loads").unwrap();
        sink.table(&["q3", "f1"], &[vec![-10e3, 2e3]]).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Loads");
        assert_eq!(lines[2], "=====");
        assert_eq!(lines[3], format!("{:>12}{:>12}", "q3", "f1"));
        assert_eq!(lines[4], "   -1.0000e4    2.0000e3");
    }

    #[test]
    fn test_text_sink_precision_sets_column_width() {
        let mut sink = TextSink::new(Vec::new()).with_precision(2);
        sink.table(&["q3", "f1"], &[vec![-10e3, 2e3]]).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("{:>10}{:>10}", "q3", "f1"));
        assert_eq!(lines[1], "   -1.00e4    2.00e3");
    }

    #[test]
    fn test_report_structure() {
        let params = FrameParameters::reference();
        let solution = solve(&params, &AnalysisOptions::default()).unwrap();
        let mut sink = RecordingSink::default();
        write_report(&params, &solution, &mut sink).unwrap();

        // 3 input tables, displacements, reactions, 2 per member
        assert_eq!(sink.tables.len(), 11);

        let (headers, rows) = &sink.tables[2];
        assert_eq!(headers, &["q1", "q2", "q3", "f1"]);
        assert_eq!(rows, &vec![vec![0.0, 0.0, -10e3, 2e3]]);

        let (headers, rows) = &sink.tables[4];
        assert_eq!(headers, &["R1", "R2", "R3", "R10", "R11"]);
        assert_eq!(rows[0].len(), 5);

        let (headers, rows) = &sink.tables[5];
        assert_eq!(headers, &["x", "N", "V", "M"]);
        assert_eq!(rows.len(), 21);

        assert!(sink
            .headings
            .iter()
            .any(|(level, text)| *level == HeadingLevel::Section && text == "Member 3 (beam)"));
    }

    #[test]
    fn test_report_to_text() {
        let params = FrameParameters::reference();
        let solution = solve(&params, &AnalysisOptions::default()).unwrap();
        let mut sink = TextSink::new(Vec::new());
        write_report(&params, &solution, &mut sink).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("Nodal displacements\n==================="));
        assert!(text.contains("Member 1 (left column)"));
        assert!(text.contains("2.0000e11"));
    }
}
