use super::ChartSpec;
use anyhow::{Context, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const FIGURE_PREFIX: &str = "const figure = ";

/// `d3-world-map` → `d3-world-map.html`; paths with an extension are kept.
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("html")
    }
}

fn page(spec: &ChartSpec) -> Result<String> {
    // `</` inside the title would close the script tag early.
    let figure = serde_json::to_string(spec)
        .context("serializing chart spec")?
        .replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>HIV estimates by country</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="map" style="width:100%;height:100vh;"></div>
<script>
{FIGURE_PREFIX}{figure};
Plotly.newPlot("map", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#
    ))
}

/// Write the chart as a standalone interactive page and return where it went.
/// Written to a hidden temp file next to the target, then renamed over it.
pub fn write_html<P: AsRef<Path>>(spec: &ChartSpec, path: P) -> Result<PathBuf> {
    let path = output_path(path);
    let html = page(spec)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("output path has no file name")?;
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    if let Err(e) = write_then_rename(&tmp_path, &path, html.as_bytes()) {
        // the temp file may or may not exist by now
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    info!(path = %path.display(), bytes = html.len(), "wrote map");
    Ok(path)
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = fs::File::create(tmp_path)
        .with_context(|| format!("creating {:?}", tmp_path))?;
    tmp.write_all(bytes)
        .with_context(|| format!("writing {:?}", tmp_path))?;
    drop(tmp);

    fs::rename(tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))
}

/// Pull the embedded figure back out of a page written by `write_html`.
pub fn read_figure(html: &str) -> Result<serde_json::Value> {
    let line = html
        .lines()
        .find_map(|l| l.strip_prefix(FIGURE_PREFIX))
        .context("no figure in page")?;
    let json = line.strip_suffix(';').unwrap_or(line);
    serde_json::from_str(json).context("parsing embedded figure")
}
