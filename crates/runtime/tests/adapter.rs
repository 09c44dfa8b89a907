//! Capability-surface tests: the adapter methods the host calls.

mod support;

use std::sync::Arc;

use hud_core::snapshot::{
    ActionCost, ActorId, ActorSnapshot, CastingKind, CombatSnapshot, ItemId, ItemSnapshot,
    ItemType, PreparationRecord, Rank, ResourcePool, SpellIdentity, SpellbookSnapshot,
};
use hud_core::{ActionKind, FilterPredicate, HudConfig};
use hud_runtime::adapter::{HudAdapter, RulesAdapter};
use hud_runtime::{ActorWrite, CounterKind, InMemoryFlagStore, Reconciler};

use support::StaticSource;

fn hero_id() -> ActorId {
    ActorId::new("hero")
}

fn hero() -> ActorSnapshot {
    let mut actor = ActorSnapshot::new(hero_id(), "Hero");
    actor.level = 4;
    actor.con_mod = 2;
    actor.hit_points = ResourcePool::new(20, 40);
    actor.focus = Some(ResourcePool::new(0, 2));

    let mut book = SpellbookSnapshot::new(ItemId::new("book"), CastingKind::Prepared);
    book.ranks.prepare(
        Rank::new(1).unwrap(),
        PreparationRecord::new(SpellIdentity::new("bless"), true),
    );
    actor.spellbooks.push(book);

    actor.items.push(
        ItemSnapshot::new(ItemId::new("toughness"), "Toughness", ItemType::Feat),
    );
    actor.items.push(
        ItemSnapshot::new(ItemId::new("sudden-charge"), "Sudden Charge", ItemType::Feat)
            .with_action_cost(ActionCost::Actions(2)),
    );
    actor.items.push(
        ItemSnapshot::new(ItemId::new("potion"), "Healing Potion", ItemType::Consumable)
            .with_uses(1, 3)
            .with_quantity(2),
    );
    actor
}

struct Fixture {
    reconciler: Reconciler,
    adapter: RulesAdapter,
    source: Arc<StaticSource>,
    flags: Arc<InMemoryFlagStore>,
}

fn fixture() -> Fixture {
    let source = Arc::new(StaticSource::new());
    source.insert(hero());
    let flags = Arc::new(InMemoryFlagStore::new());

    let reconciler = Reconciler::builder()
        .displayed_actor(hero_id())
        .source(source.clone())
        .flag_store(flags.clone())
        .build()
        .expect("reconciler builds");

    let adapter = RulesAdapter::new(
        HudConfig::default(),
        source.clone(),
        flags.clone(),
        reconciler.handle(),
    );

    Fixture {
        reconciler,
        adapter,
        source,
        flags,
    }
}

#[tokio::test]
async fn cell_data_resolves_uses_and_quantity() {
    let fixture = fixture();

    let data = fixture
        .adapter
        .cell_data(&hero_id(), &ItemId::new("potion"))
        .await
        .expect("potion resolves");

    assert_eq!(data.kind, Some(ActionKind::Consumable));
    assert_eq!(data.quantity, Some(2));
    assert_eq!(data.uses, Some(ResourcePool::new(1, 3)));

    let missing = fixture
        .adapter
        .cell_data(&hero_id(), &ItemId::new("deleted"))
        .await;
    assert!(missing.is_none());
}

#[tokio::test]
async fn filters_and_buttons_come_from_the_rules() {
    let fixture = fixture();
    let actor = hero();

    let chips = fixture.adapter.filters(&actor);
    assert!(chips
        .iter()
        .any(|chip| chip.predicate == FilterPredicate::ActionCost(1)));

    let buttons = fixture
        .adapter
        .buttons(&actor, &CombatSnapshot::inactive());
    assert!(buttons.iter().any(|b| b.id == "rest" && b.visible));
}

#[tokio::test]
async fn action_use_spends_the_matching_counter() {
    let fixture = fixture();
    let handle = fixture.reconciler.handle();

    let remaining = fixture
        .adapter
        .on_action_used(ActionKind::Feat, Some(ActionCost::Actions(2)))
        .await
        .unwrap();
    assert_eq!(remaining, 1);
    assert_eq!(handle.counter(CounterKind::Action).await.unwrap(), 1);

    let remaining = fixture
        .adapter
        .on_action_used(ActionKind::Feat, Some(ActionCost::Reaction))
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert_eq!(handle.counter(CounterKind::Reaction).await.unwrap(), 0);

    // A bare strike costs one action.
    let remaining = fixture
        .adapter
        .on_action_used(ActionKind::Strike, None)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn rest_restores_pools_and_resets_counters() {
    let fixture = fixture();
    let handle = fixture.reconciler.handle();

    handle.use_counter(CounterKind::Action, 3).await.unwrap();
    handle.use_counter(CounterKind::Reaction, 1).await.unwrap();

    let outcome = fixture.adapter.rest(&hero_id()).await.unwrap();
    // Level 4, Con +2: eight hours restore 8 hit points.
    assert_eq!(outcome.hp_restored, 8);

    let writes = fixture.source.writes();
    assert!(writes.contains(&(hero_id(), ActorWrite::HitPoints(28))));
    assert!(writes.contains(&(
        hero_id(),
        ActorWrite::ResetPreparations {
            entry: ItemId::new("book"),
        }
    )));
    assert!(writes.contains(&(hero_id(), ActorWrite::Focus(2))));

    assert_eq!(handle.counter(CounterKind::Action).await.unwrap(), 3);
    assert_eq!(handle.counter(CounterKind::Reaction).await.unwrap(), 1);
}

#[tokio::test]
async fn passive_selection_persists_to_flags() {
    let fixture = fixture();

    let passives = fixture.adapter.select_passives(&hero_id()).await.unwrap();
    assert_eq!(passives, vec![ItemId::new("toughness")]);

    use hud_runtime::repository::FlagStore;
    let stored = fixture
        .flags
        .read_flag(&hero_id(), "selected_passives")
        .await
        .unwrap()
        .expect("selection stored");
    assert_eq!(stored, serde_json::json!(["toughness"]));
}
