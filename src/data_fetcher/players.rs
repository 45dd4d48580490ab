//! Player id lookup against the sharded person register.

use reqwest::Client;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

use crate::config::PlayerStatsConfig;
use crate::data_fetcher::fetch_utils::send_request;
use crate::data_fetcher::models::PlayerIdRecord;
use crate::data_fetcher::urls::build_register_url;
use crate::error::AppError;

/// Parses one register file and returns the rows matching the name.
/// Rows without an MLBAM id are skipped.
pub fn find_in_register(
    register_csv: &str,
    last: &str,
    first: &str,
) -> Result<Vec<PlayerIdRecord>, AppError> {
    let mut reader = csv::Reader::from_reader(register_csv.as_bytes());
    let mut matches = Vec::new();

    for record in reader.deserialize::<PlayerIdRecord>() {
        let record = record?;
        if record.key_mlbam.is_some() && record.matches_name(last, first) {
            matches.push(record);
        }
    }

    Ok(matches)
}

/// Resolves exactly one player id from the matching register rows.
pub fn resolve_single_id(
    matches: &[PlayerIdRecord],
    last: &str,
    first: &str,
) -> Result<u32, AppError> {
    let ids: BTreeSet<u32> = matches.iter().filter_map(|m| m.key_mlbam).collect();

    let mut ids = ids.into_iter();
    match (ids.next(), ids.next()) {
        (None, _) => Err(AppError::player_not_found(last, first)),
        (Some(id), None) => Ok(id),
        (Some(first_id), Some(second_id)) => {
            let mut candidates = vec![first_id, second_id];
            candidates.extend(ids);
            Err(AppError::ambiguous_player(last, first, candidates))
        }
    }
}

/// Looks up the configured player's MLBAM id.
///
/// Every register file is scanned so that duplicate names are detected.
///
/// # Errors
/// * `AppError::PlayerNotFound` - No register row matches the name
/// * `AppError::AmbiguousPlayer` - More than one distinct id matches
#[instrument(skip(client, stats), fields(last = %stats.last_name, first = %stats.first_name))]
pub async fn lookup_player_id(client: &Client, stats: &PlayerStatsConfig) -> Result<u32, AppError> {
    let mut matches = Vec::new();

    for file in &stats.register_files {
        let url = build_register_url(&stats.register_base_url, file)?;
        let body = send_request(client.get(url.clone()), url.as_str()).await?;

        let found = find_in_register(&body, &stats.last_name, &stats.first_name)?;
        debug!("{} matching rows in {}", found.len(), file);
        matches.extend(found);
    }

    let player_id = resolve_single_id(&matches, &stats.last_name, &stats.first_name)?;

    if let Some(record) = matches.iter().find(|m| m.key_mlbam == Some(player_id)) {
        info!(
            "Resolved {} {} to MLBAM id {} (MLB {:?}-{:?})",
            record.name_first,
            record.name_last,
            player_id,
            record.mlb_played_first,
            record.mlb_played_last
        );
    }

    Ok(player_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::http_client::create_test_http_client;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    const REGISTER_HEADER: &str =
        "key_person,key_uuid,key_mlbam,key_retro,name_last,name_first,mlb_played_first,mlb_played_last";

    fn register(rows: &[&str]) -> String {
        let mut text = REGISTER_HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    fn stats_for(server: &MockServer, files: &[&str]) -> PlayerStatsConfig {
        PlayerStatsConfig {
            register_base_url: format!("{}/data", server.uri()),
            register_files: files.iter().map(|f| f.to_string()).collect(),
            ..PlayerStatsConfig::default()
        }
    }

    #[test]
    fn test_find_in_register_is_case_insensitive() {
        let text = register(&[
            "p1,u1,521692,pers001,Perez,Salvador,2011,2024",
            "p2,u2,,pers002,Perez,Salvador,,",
            "p3,u3,400085,pere001,Perez,Eduardo,1993,2006",
        ]);

        let found = find_in_register(&text, "perez", "salvador").unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key_mlbam, Some(521692));
    }

    #[test]
    fn test_resolve_single_id_outcomes() {
        let record = |id: u32| PlayerIdRecord {
            name_last: "Smith".to_string(),
            name_first: "Will".to_string(),
            key_mlbam: Some(id),
            mlb_played_first: None,
            mlb_played_last: None,
        };

        assert!(matches!(
            resolve_single_id(&[], "smith", "will"),
            Err(AppError::PlayerNotFound { .. })
        ));
        assert_eq!(resolve_single_id(&[record(669023)], "smith", "will").unwrap(), 669023);
        // The same id seen twice is still one player
        assert_eq!(
            resolve_single_id(&[record(669023), record(669023)], "smith", "will").unwrap(),
            669023
        );

        match resolve_single_id(&[record(669023), record(519299)], "smith", "will") {
            Err(AppError::AmbiguousPlayer { candidates, .. }) => {
                assert_eq!(candidates, vec![519299, 669023]);
            }
            other => panic!("expected ambiguous player, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_player_id_across_shards() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/people-0.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(register(&[
                "p3,u3,400085,pere001,Perez,Eduardo,1993,2006",
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/people-1.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(register(&[
                "p1,u1,521692,pers001,Perez,Salvador,2011,2024",
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let stats = stats_for(&mock_server, &["people-0.csv", "people-1.csv"]);

        let id = lookup_player_id(&client, &stats).await.unwrap();
        assert_eq!(id, 521692);
    }

    #[tokio::test]
    async fn test_lookup_player_id_no_match() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/people-0.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(register(&[
                "p3,u3,400085,pere001,Perez,Eduardo,1993,2006",
            ])))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let stats = stats_for(&mock_server, &["people-0.csv"]);

        let result = lookup_player_id(&client, &stats).await;
        assert!(matches!(result, Err(AppError::PlayerNotFound { .. })));
    }

    #[tokio::test]
    async fn test_lookup_player_id_missing_shard_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/people-0.csv"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let stats = stats_for(&mock_server, &["people-0.csv"]);

        let result = lookup_player_id(&client, &stats).await;
        assert!(matches!(result, Err(AppError::ApiNotFound { .. })));
    }
}
