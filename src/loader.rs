use crate::error::{Result, VizError};
use crate::model::LineRecord;
use crate::util::is_url;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct RawRow {
    commit: String,
    file: String,
    line: String,
    #[serde(rename = "type")]
    kind: String,
    length: String,
    depth: String,
    author: String,
    date: String,
    time: String,
    timezone: String,
    datetime: String,
}

/// Load every line record from a file path or an http(s) URL.
///
/// The load is all-or-nothing: one unreadable row fails the whole dataset.
pub fn load_records(locator: &str, timeout: Duration, show_progress: bool) -> Result<Vec<LineRecord>> {
    let records = if is_url(locator) {
        let body = fetch_text(locator, timeout, show_progress)?;
        parse_records(body.as_bytes())?
    } else {
        let file = File::open(locator)?;
        parse_records(BufReader::new(file))?
    };
    info!(source = locator, rows = records.len(), "loaded line records");
    Ok(records)
}

/// Read a text resource, over HTTP with a bounded timeout when `locator` is a URL.
pub fn fetch_text(locator: &str, timeout: Duration, show_progress: bool) -> Result<String> {
    if !is_url(locator) {
        return Ok(std::fs::read_to_string(locator)?);
    }

    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {locator}..."));
        Some(pb)
    } else {
        None
    };

    debug!(url = locator, ?timeout, "fetching resource");
    let result = fetch_url(locator, timeout);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    result
}

fn fetch_url(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("locviz/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.text()?)
}

/// Parse a header-named CSV stream into line records.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<LineRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in rdr.deserialize::<RawRow>().enumerate() {
        let raw = row?;
        records.push(parse_row(raw, idx + 1)?);
    }
    Ok(records)
}

fn parse_row(raw: RawRow, row: usize) -> Result<LineRecord> {
    let line = parse_int(&raw.line, row, "line")?;
    if line == 0 {
        return Err(VizError::MalformedRow {
            row,
            field: "line",
            value: raw.line,
        });
    }
    let length = parse_int(&raw.length, row, "length")?;
    let depth = parse_int(&raw.depth, row, "depth")?;

    let offset = parse_offset(&raw.timezone).ok_or_else(|| VizError::MalformedRow {
        row,
        field: "timezone",
        value: raw.timezone.clone(),
    })?;
    let date = parse_day(&raw.date, offset).ok_or_else(|| VizError::MalformedRow {
        row,
        field: "date",
        value: raw.date.clone(),
    })?;
    let datetime = parse_datetime(&raw.datetime, offset).ok_or_else(|| VizError::MalformedRow {
        row,
        field: "datetime",
        value: raw.datetime.clone(),
    })?;

    Ok(LineRecord {
        commit: raw.commit,
        file: raw.file,
        line,
        kind: raw.kind,
        length,
        depth,
        author: raw.author,
        date,
        time: raw.time,
        timezone: raw.timezone,
        datetime,
    })
}

fn parse_int(value: &str, row: usize, field: &'static str) -> Result<u32> {
    value.parse::<u32>().map_err(|_| VizError::MalformedRow {
        row,
        field,
        value: value.to_string(),
    })
}

/// Parse `Z`, `+HH:MM`, `-HHMM` or `+HH` into a fixed offset.
pub fn parse_offset(tz: &str) -> Option<FixedOffset> {
    if tz.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match tz.as_bytes().first()? {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Midnight of `date` in the row's own offset.
fn parse_day(date: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    offset.from_local_datetime(&day.and_hms_opt(0, 0, 0)?).single()
}

/// Parse the full timestamp column; a value without an offset takes the row's timezone.
fn parse_datetime(value: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return offset.from_local_datetime(&naive).single();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use std::io::Write;
    use std::net::{TcpListener, TcpStream};
    use std::thread;
    use std::time::Instant;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "commit,file,line,type,length,depth,author,date,time,timezone,datetime\n";

    #[test]
    fn parses_typed_fields() {
        let csv = format!(
            "{HEADER}abc123,src/main.js,4,js,27,2,alice,2025-02-10,13:45:12,-08:00,2025-02-10T13:45:12-08:00\n"
        );
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.commit, "abc123");
        assert_eq!(r.kind, "js");
        assert_eq!((r.line, r.length, r.depth), (4, 27, 2));
        assert_eq!(r.date.to_rfc3339(), "2025-02-10T00:00:00-08:00");
        assert_eq!(r.datetime.hour(), 13);
        assert_eq!(r.datetime.minute(), 45);
    }

    #[test]
    fn non_numeric_field_fails_whole_load() {
        let csv = format!(
            "{HEADER}a,f.js,1,js,10,0,al,2025-02-10,10:00:00,+00:00,2025-02-10T10:00:00+00:00\n\
             b,f.js,2,js,ten,0,al,2025-02-10,10:00:00,+00:00,2025-02-10T10:00:00+00:00\n"
        );
        let err = parse_records(csv.as_bytes()).unwrap_err();
        match err {
            VizError::MalformedRow { row, field, value } => {
                assert_eq!(row, 2);
                assert_eq!(field, "length");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn line_numbers_start_at_one() {
        let csv = format!(
            "{HEADER}a,f.js,0,js,10,0,al,2025-02-10,10:00:00,+00:00,2025-02-10T10:00:00+00:00\n"
        );
        assert!(matches!(
            parse_records(csv.as_bytes()),
            Err(VizError::MalformedRow { field: "line", .. })
        ));
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "commit,file,line\nabc,f.js,1\n";
        assert!(matches!(parse_records(csv.as_bytes()), Err(VizError::Csv(_))));
    }

    #[test]
    fn empty_dataset_is_valid() {
        assert!(parse_records(HEADER.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn datetime_without_offset_uses_row_timezone() {
        let csv = format!(
            "{HEADER}a,f.js,1,js,10,0,al,2025-02-10,10:00:00,+05:30,2025-02-10T10:00:00\n"
        );
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].datetime.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("-08:00").unwrap().local_minus_utc(), -8 * 3600);
        assert_eq!(parse_offset("+0530").unwrap().local_minus_utc(), 19800);
        assert_eq!(parse_offset("+02").unwrap().local_minus_utc(), 7200);
        assert!(parse_offset("08:00").is_none());
        assert!(parse_offset("+08:75").is_none());
    }

    #[test]
    fn reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loc.csv");
        std::fs::write(
            &path,
            format!("{HEADER}a,f.js,1,js,10,0,al,2025-02-10,10:00:00,Z,2025-02-10T10:00:00Z\n"),
        )
        .unwrap();
        let records = load_records(path.to_str().unwrap(), Duration::from_secs(1), false).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_records("/definitely/not/here/loc.csv", Duration::from_secs(1), false).unwrap_err();
        assert!(matches!(err, VizError::Io(_)));
    }

    /// Serve one connection: read the request head, then write `response`.
    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/loc.csv", listener.local_addr().unwrap());
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request_head(&mut stream);
            let _ = stream.write_all(response.as_bytes());
        });
        url
    }

    fn read_request_head(stream: &mut TcpStream) {
        let mut head = Vec::new();
        let mut buf = [0u8; 512];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }
    }

    #[test]
    fn fetches_csv_over_http() {
        let body = format!("{HEADER}a,f.js,1,js,10,0,al,2025-02-10,10:00:00,Z,2025-02-10T10:00:00Z\n");
        let url = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ));
        let records = load_records(&url, Duration::from_secs(5), false).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].commit, "a");
    }

    #[test]
    fn http_error_status_fails_the_load() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
        );
        let err = load_records(&url, Duration::from_secs(5), false).unwrap_err();
        match err {
            VizError::Http(e) => assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND)),
            other => panic!("expected an HTTP error, got {other:?}"),
        }
    }

    #[test]
    fn silent_server_hits_the_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/loc.csv", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request_head(&mut stream);
            thread::sleep(Duration::from_secs(3));
        });

        let started = Instant::now();
        let err = load_records(&url, Duration::from_millis(200), false).unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(2));
        match err {
            VizError::Http(e) => assert!(e.is_timeout()),
            other => panic!("expected an HTTP timeout, got {other:?}"),
        }
        server.join().unwrap();
    }

    #[test]
    fn unreachable_host_is_fatal() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/loc.csv", listener.local_addr().unwrap());
        drop(listener);
        let err = load_records(&url, Duration::from_secs(2), false).unwrap_err();
        assert!(matches!(err, VizError::Http(_)));
    }
}
