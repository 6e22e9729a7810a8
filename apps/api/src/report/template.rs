//! Fixed HTML document shell for generated reports.

/// Inline stylesheet for the report page. Self-contained: no external fonts or assets.
const REPORT_CSS: &str = r#"
        body {
            font-family: 'Segoe UI', Tahoma, sans-serif;
            font-size: 16px;
            color: #222;
            line-height: 1.7;
            padding: 40px;
        }
        h1, h2, h3 {
            color: #0077cc;
            margin-bottom: 10px;
        }
        p {
            margin-bottom: 15px;
        }
        ul, ol {
            margin-bottom: 20px;
            padding-left: 25px;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ccc;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #f4f4f4;
        }
"#;

/// Wraps the model's HTML fragment in the report document.
/// The fragment is embedded verbatim.
pub fn render_report_html(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Team Productivity Report</title>\n\
         <style>{REPORT_CSS}</style>\n\
         </head>\n\
         <body>\n\
         {fragment}\n\
         </body>\n\
         </html>\n"
    )
}
