//! Repository tests for ship designs, players and fleets against a real
//! database.

use shipyard_core::fleet::{Fleet, ShipToken};
use shipyard_core::ship_design::{ShipDesign, ShipDesignPurpose, ShipDesignSlot, ShipDesignSpec};
use shipyard_core::tech::TechLevel;
use shipyard_core::types::Vector;
use shipyard_db::models::player::CreatePlayer;
use shipyard_db::repositories::{DesignDeletion, FleetRepo, PlayerRepo, ShipDesignRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const GAME: i64 = 1;

async fn seed_player(pool: &PgPool, num: i32) {
    PlayerRepo::create(
        pool,
        &CreatePlayer {
            game_id: GAME,
            num,
            name: format!("Player {num}"),
            tech_levels: TechLevel::new(3, 3, 3, 3, 3, 3),
            race_spec: None,
            friends: Vec::new(),
        },
    )
    .await
    .unwrap();
}

fn scout(player_num: i32, name: &str) -> ShipDesign {
    let mut design = ShipDesign::new(GAME, player_num, name, "Scout")
        .with_slots(vec![
            ShipDesignSlot::new("Quick Jump 5", 1, 1),
            ShipDesignSlot::new("Rhino Scanner", 2, 1),
        ])
        .with_purpose(ShipDesignPurpose::Scout);
    design.spec = ShipDesignSpec {
        mass: Some(25),
        armor: Some(20),
        ..Default::default()
    };
    design
}

fn fleet(player_num: i32, num: i32, tokens: Vec<ShipToken>) -> Fleet {
    let mut f = Fleet::new(GAME, player_num, num, &format!("Fleet #{num}"), Vector::new(10.0, 20.0));
    f.tokens = tokens;
    f
}

// ---------------------------------------------------------------------------
// Designs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_assigns_numbers_per_player(pool: PgPool) {
    seed_player(&pool, 1).await;
    seed_player(&pool, 2).await;

    let a = ShipDesignRepo::create(&pool, &scout(1, "Scout A")).await.unwrap();
    let b = ShipDesignRepo::create(&pool, &scout(1, "Scout B")).await.unwrap();
    let c = ShipDesignRepo::create(&pool, &scout(2, "Scout A")).await.unwrap();

    assert_eq!(a.num, Some(1));
    assert_eq!(b.num, Some(2));
    assert_eq!(c.num, Some(1));
    assert!(a.id.is_some());
    assert!(a.uuid.is_some());
    assert_ne!(a.uuid, b.uuid);
    assert!(a.created_at.is_some());

    assert_eq!(a.slots.len(), 2);
    assert_eq!(a.purpose, Some(ShipDesignPurpose::Scout));
    assert_eq!(a.spec.mass, Some(25));
    assert_eq!(a.spec.cloak_percent, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_is_rejected(pool: PgPool) {
    seed_player(&pool, 1).await;
    ShipDesignRepo::create(&pool, &scout(1, "Scout")).await.unwrap();

    let result = ShipDesignRepo::create(&pool, &scout(1, "Scout")).await;
    assert!(result.is_err(), "Duplicate design name should fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn design_requires_existing_player(pool: PgPool) {
    let result = ShipDesignRepo::create(&pool, &scout(9, "Orphan")).await;
    assert!(result.is_err(), "Design for an unknown player should fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_and_list(pool: PgPool) {
    seed_player(&pool, 1).await;
    let a = ShipDesignRepo::create(&pool, &scout(1, "A")).await.unwrap();
    ShipDesignRepo::create(&pool, &scout(1, "B")).await.unwrap();
    ShipDesignRepo::create(&pool, &scout(1, "C")).await.unwrap();

    let by_id = ShipDesignRepo::find_by_id(&pool, a.id.unwrap()).await.unwrap();
    assert_eq!(by_id.map(|d| d.name), Some("A".to_string()));

    let by_num = ShipDesignRepo::find_by_num(&pool, GAME, 1, 2).await.unwrap();
    assert_eq!(by_num.map(|d| d.name), Some("B".to_string()));

    assert!(ShipDesignRepo::find_by_num(&pool, GAME, 1, 99).await.unwrap().is_none());

    let some = ShipDesignRepo::find_by_nums(&pool, GAME, 1, &[3, 1, 42]).await.unwrap();
    let names: Vec<_> = some.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);

    let all = ShipDesignRepo::list_for_player(&pool, GAME, 1).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(ShipDesignRepo::list_for_player(&pool, GAME, 2).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_overwrites_fields(pool: PgPool) {
    seed_player(&pool, 1).await;
    let mut design = ShipDesignRepo::create(&pool, &scout(1, "Scout")).await.unwrap();

    design.name = "Long Range Scout".into();
    design.version = 1;
    design.slots.push(ShipDesignSlot::new("Fuel Tank", 3, 1));
    design.spec.mass = Some(28);

    let updated = ShipDesignRepo::update(&pool, &design).await.unwrap().unwrap();
    assert_eq!(updated.name, "Long Range Scout");
    assert_eq!(updated.version, 1);
    assert_eq!(updated.slots.len(), 3);
    assert_eq!(updated.spec.mass, Some(28));
    assert_eq!(updated.num, design.num);
    assert!(updated.updated_at >= design.updated_at);

    let mut missing = design.clone();
    missing.id = Some(999_999);
    assert!(ShipDesignRepo::update(&pool, &missing).await.unwrap().is_none());

    missing.id = None;
    assert!(ShipDesignRepo::update(&pool, &missing).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_specs_writes_every_design(pool: PgPool) {
    seed_player(&pool, 1).await;
    let mut designs = vec![
        ShipDesignRepo::create(&pool, &scout(1, "Scout A")).await.unwrap(),
        ShipDesignRepo::create(&pool, &scout(1, "Scout B")).await.unwrap(),
    ];
    for design in &mut designs {
        design.spec.mass = Some(99);
        design.name = "ignored".into();
    }

    let saved = ShipDesignRepo::update_specs(&pool, &designs).await.unwrap();
    assert_eq!(saved.len(), 2);

    let stored = ShipDesignRepo::list_for_player(&pool, GAME, 1).await.unwrap();
    assert!(stored.iter().all(|d| d.spec.mass == Some(99)));
    // only the spec column changes
    assert_eq!(stored[0].name, "Scout A");
    assert_eq!(stored[1].name, "Scout B");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_id(pool: PgPool) {
    seed_player(&pool, 1).await;
    let design = ShipDesignRepo::create(&pool, &scout(1, "Scout")).await.unwrap();
    let id = design.id.unwrap();

    assert!(ShipDesignRepo::delete(&pool, id).await.unwrap());
    assert!(!ShipDesignRepo::delete(&pool, id).await.unwrap());
    assert!(ShipDesignRepo::find_by_id(&pool, id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_with_fleets_strips_tokens(pool: PgPool) {
    seed_player(&pool, 1).await;
    seed_player(&pool, 2).await;
    let doomed = ShipDesignRepo::create(&pool, &scout(1, "Doomed")).await.unwrap();
    let kept = ShipDesignRepo::create(&pool, &scout(1, "Kept")).await.unwrap();
    let doomed_num = doomed.num.unwrap();
    let kept_num = kept.num.unwrap();

    // Mixed fleet keeps its other ships, pure fleet disappears, other
    // player's fleet with the same design number is untouched.
    FleetRepo::create(
        &pool,
        &fleet(1, 1, vec![ShipToken::new(doomed_num, 2), ShipToken::new(kept_num, 1)]),
    )
    .await
    .unwrap();
    FleetRepo::create(&pool, &fleet(1, 2, vec![ShipToken::new(doomed_num, 5)]))
        .await
        .unwrap();
    FleetRepo::create(&pool, &fleet(1, 3, vec![ShipToken::new(kept_num, 3)]))
        .await
        .unwrap();
    FleetRepo::create(&pool, &fleet(2, 1, vec![ShipToken::new(doomed_num, 1)]))
        .await
        .unwrap();

    let result = ShipDesignRepo::delete_with_fleets(&pool, GAME, 1, doomed_num)
        .await
        .unwrap();
    assert_eq!(
        result,
        Some(DesignDeletion {
            fleets_updated: 1,
            fleets_deleted: 1,
        })
    );

    let fleets = FleetRepo::list_for_player(&pool, GAME, 1).await.unwrap();
    let nums: Vec<_> = fleets.iter().map(|f| f.num).collect();
    assert_eq!(nums, [1, 3]);
    assert_eq!(fleets[0].tokens, vec![ShipToken::new(kept_num, 1)]);
    assert_eq!(fleets[1].tokens, vec![ShipToken::new(kept_num, 3)]);

    let others = FleetRepo::list_for_player(&pool, GAME, 2).await.unwrap();
    assert_eq!(others[0].tokens, vec![ShipToken::new(doomed_num, 1)]);

    assert!(ShipDesignRepo::find_by_num(&pool, GAME, 1, doomed_num)
        .await
        .unwrap()
        .is_none());

    let again = ShipDesignRepo::delete_with_fleets(&pool, GAME, 1, doomed_num)
        .await
        .unwrap();
    assert_eq!(again, None);
}

// ---------------------------------------------------------------------------
// Players and fleets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn player_round_trip(pool: PgPool) {
    seed_player(&pool, 1).await;

    let player = PlayerRepo::find_by_num(&pool, GAME, 1).await.unwrap().unwrap();
    assert_eq!(player.name, "Player 1");
    assert_eq!(player.tech_levels, TechLevel::new(3, 3, 3, 3, 3, 3));
    assert_eq!(player.race_spec.fuel_efficiency, 1.0);

    let levels = TechLevel::new(5, 4, 6, 3, 2, 1);
    let updated = PlayerRepo::update_tech_levels(&pool, GAME, 1, &levels)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.tech_levels, levels);

    assert!(PlayerRepo::update_tech_levels(&pool, GAME, 7, &levels)
        .await
        .unwrap()
        .is_none());
    assert!(PlayerRepo::find_by_num(&pool, GAME, 7).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fleet_tokens_update_and_delete(pool: PgPool) {
    seed_player(&pool, 1).await;
    let created = FleetRepo::create(&pool, &fleet(1, 1, vec![ShipToken::new(1, 4)]))
        .await
        .unwrap();
    let id = created.id.unwrap();
    assert_eq!(created.position, Vector::new(10.0, 20.0));

    let mut token = ShipToken::new(1, 3);
    token.damage = 12.5;
    token.quantity_damaged = 1;
    assert!(FleetRepo::update_tokens(&pool, id, &[token.clone()]).await.unwrap());

    let fleets = FleetRepo::list_for_player(&pool, GAME, 1).await.unwrap();
    assert_eq!(fleets[0].tokens, vec![token]);

    assert!(FleetRepo::delete(&pool, id).await.unwrap());
    assert!(!FleetRepo::update_tokens(&pool, id, &[]).await.unwrap());
}
