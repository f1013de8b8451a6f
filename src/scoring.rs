//! Point-based release scoring fallback
//!
//! When Radarr's custom-format score does not separate the candidates (the
//! best score is zero), the selector falls back to this heuristic: a pure,
//! deterministic point function over a release's attributes. Quality
//! attributes are parsed from the release title, which is the only place
//! indexers reliably encode them.

use crate::config::ScoringConfig;
use crate::types::Release;
use regex::Regex;

/// Resolution parsed from a release title
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Resolution {
    R2160,
    R1080,
    R720,
    R480,
}

/// Source media parsed from a release title
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    BluRay,
    WebDl,
    WebRip,
    Hdtv,
    DvdRip,
}

/// Video codec parsed from a release title
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Codec {
    X265,
    Av1,
    X264,
}

/// Quality attributes parsed from a release title
#[derive(Debug, Default)]
struct ParsedQuality {
    resolution: Option<Resolution>,
    source: Option<Source>,
    codec: Option<Codec>,
    hdr: bool,
    release_group: Option<String>,
}

impl ParsedQuality {
    fn from_title(title: &str) -> Self {
        let lower = title.to_lowercase();

        let resolution = if lower.contains("2160p") || lower.contains("4k") || lower.contains("uhd")
        {
            Some(Resolution::R2160)
        } else if lower.contains("1080p") {
            Some(Resolution::R1080)
        } else if lower.contains("720p") {
            Some(Resolution::R720)
        } else if lower.contains("480p") || lower.contains("dvdscr") {
            Some(Resolution::R480)
        } else {
            None
        };

        let source = if lower.contains("bluray") || lower.contains("blu-ray") || lower.contains("bdrip")
        {
            Some(Source::BluRay)
        } else if lower.contains("web-dl") || lower.contains("webdl") {
            Some(Source::WebDl)
        } else if lower.contains("webrip") || lower.contains("web-rip") {
            Some(Source::WebRip)
        } else if lower.contains("hdtv") {
            Some(Source::Hdtv)
        } else if lower.contains("dvdrip") {
            Some(Source::DvdRip)
        } else {
            None
        };

        let codec = if lower.contains("x265") || lower.contains("hevc") || lower.contains("h.265") {
            Some(Codec::X265)
        } else if lower.contains("av1") {
            Some(Codec::Av1)
        } else if lower.contains("x264") || lower.contains("h.264") || lower.contains("avc") {
            Some(Codec::X264)
        } else {
            None
        };

        let hdr = lower.contains("hdr")
            || lower.contains("dolby vision")
            || lower.contains("dolbyvision")
            || lower.contains(".dv.");

        let release_group = extract_release_group(title);

        Self {
            resolution,
            source,
            codec,
            hdr,
            release_group,
        }
    }
}

/// Extract the release group from a title (after the last dash, before an
/// optional extension)
fn extract_release_group(title: &str) -> Option<String> {
    let group_re = Regex::new(r"-([A-Za-z0-9]+)(?:\.[A-Za-z0-9]+)?$").ok()?;
    group_re
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Score a release for ranking (higher is better)
///
/// Pure function of the release's attributes and the scoring weights; no side
/// effects, deterministic. The result may be zero or negative, in which case
/// the selector keeps its custom-format-score answer.
pub fn calculate_release_score(release: &Release, config: &ScoringConfig) -> i64 {
    let mut score: i64 = 0;

    // Well-seeded torrents are the strongest availability signal
    if let Some(seeders) = release.seeders {
        score += i64::from(seeders.min(config.seeder_cap)) * config.seeder_weight;
    }

    let parsed = ParsedQuality::from_title(&release.title);

    score += match parsed.resolution {
        Some(Resolution::R2160) => 40,
        Some(Resolution::R1080) => 30,
        Some(Resolution::R720) => 20,
        Some(Resolution::R480) => 10,
        None => 0,
    };

    score += match parsed.source {
        Some(Source::BluRay) => 20,
        Some(Source::WebDl) => 15,
        Some(Source::WebRip) => 10,
        Some(Source::Hdtv) => 5,
        Some(Source::DvdRip) => 2,
        None => 0,
    };

    score += match parsed.codec {
        Some(Codec::X265) => 15,
        Some(Codec::Av1) => 10,
        Some(Codec::X264) => 5,
        None => 0,
    };

    if parsed.hdr {
        score += 25;
    }

    // Tagged scene/p2p groups are a weak trust signal over anonymous uploads
    if parsed.release_group.is_some() {
        score += 5;
    }

    if release.rejected {
        score -= config.rejected_penalty;
    }

    score
}
