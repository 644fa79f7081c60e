//! CSV export of batch results

use skulink_core::models::AttachmentResult;

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// `Filename,Status,Message` with every field double-quoted
pub fn csv_report(results: &[AttachmentResult]) -> String {
    let mut out = String::from("Filename,Status,Message\n");
    for result in results {
        out.push_str(&quote(&result.filename));
        out.push(',');
        out.push_str(&quote(&result.status.to_string()));
        out.push(',');
        out.push_str(&quote(&result.message));
        out.push('\n');
    }
    out
}
