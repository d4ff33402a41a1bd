//! Black-box scenarios against a fully assembled engine, mirroring how a
//! host (UI or service) would drive it.

use chrono::Utc;

use splitledger_core::{GroupId, LedgerError, MemberId, Money};
use splitledger_engine::{LedgerEngine, LedgerEvent};
use splitledger_expenses::{Category, NewExpense, Split};
use splitledger_settlement::InMemoryRail;

const OWNER: MemberId = MemberId::from_low_u64(1);
const ALICE: MemberId = MemberId::from_low_u64(2);
const BOB: MemberId = MemberId::from_low_u64(3);
const CHARLIE: MemberId = MemberId::from_low_u64(4);
const EXECUTOR: MemberId = MemberId::from_low_u64(0xff);

fn usdc(major: i64) -> Money {
    Money::from_units(major * Money::SCALE)
}

fn engine() -> LedgerEngine<InMemoryRail> {
    splitledger_observability::init();
    let mut rail = InMemoryRail::new(EXECUTOR);
    for member in [OWNER, ALICE, BOB, CHARLIE] {
        rail.mint(member, usdc(1000));
    }
    LedgerEngine::new(OWNER, EXECUTOR, rail).unwrap()
}

fn expense(amount: Money, description: &str, category: Category, splits: Vec<Split>) -> NewExpense {
    NewExpense {
        amount,
        description: description.to_string(),
        category,
        splits,
        occurred_at: Utc::now(),
    }
}

fn split(member: MemberId, amount: Money) -> Split {
    Split { member, amount }
}

fn assert_zero_sum(engine: &LedgerEngine<InMemoryRail>, group: GroupId) {
    let sum: i64 = engine
        .balances(group)
        .unwrap()
        .iter()
        .map(|(_, b)| b.units())
        .sum();
    assert_eq!(sum, 0, "balances must sum to zero");
}

/// Scenario A: owner pays 30.00 for dinner, split across the other three.
#[test]
fn dinner_split_across_three_members() {
    let mut engine = engine();
    let group = engine.create_group(OWNER, &[ALICE, BOB, CHARLIE]).unwrap();

    let index = engine
        .add_expense(
            group,
            OWNER,
            expense(
                usdc(30),
                "Dinner",
                Category::FoodDrink,
                vec![
                    split(ALICE, usdc(10)),
                    split(BOB, usdc(10)),
                    split(CHARLIE, usdc(10)),
                ],
            ),
        )
        .unwrap();

    assert_eq!(index, 0);
    assert_eq!(engine.balance(group, OWNER), usdc(30));
    assert_eq!(engine.balance(group, ALICE), usdc(-10));
    assert_eq!(engine.balance(group, BOB), usdc(-10));
    assert_eq!(engine.balance(group, CHARLIE), usdc(-10));
    assert_zero_sum(&engine, group);
}

/// Scenario B: a second expense, paid by Alice, reshapes the balances.
#[test]
fn second_expense_accumulates_onto_balances() {
    let mut engine = engine();
    let group = engine.create_group(OWNER, &[ALICE, BOB, CHARLIE]).unwrap();

    engine
        .add_expense(
            group,
            OWNER,
            expense(
                usdc(30),
                "Dinner",
                Category::FoodDrink,
                vec![
                    split(ALICE, usdc(10)),
                    split(BOB, usdc(10)),
                    split(CHARLIE, usdc(10)),
                ],
            ),
        )
        .unwrap();
    engine
        .add_expense(
            group,
            ALICE,
            expense(
                usdc(20),
                "Taxi",
                Category::Transport,
                vec![split(OWNER, usdc(10)), split(BOB, usdc(10))],
            ),
        )
        .unwrap();

    assert_eq!(engine.balance(group, OWNER), usdc(20));
    assert_eq!(engine.balance(group, ALICE), usdc(10));
    assert_eq!(engine.balance(group, BOB), usdc(-20));
    assert_eq!(engine.balance(group, CHARLIE), usdc(-10));
    assert_eq!(engine.expense_count(group), 2);
    assert_zero_sum(&engine, group);

    let record = engine.expense(group, 1).unwrap();
    assert_eq!(record.payer(), ALICE);
    assert_eq!(record.description(), "Taxi");
    assert_eq!(record.category(), Category::Transport);
}

/// Scenario C: the computed plan from B zeroes every balance when applied.
#[test]
fn settlement_plan_zeroes_the_group() {
    let mut engine = engine();
    let group = engine.create_group(OWNER, &[ALICE, BOB, CHARLIE]).unwrap();

    engine
        .add_expense(
            group,
            OWNER,
            expense(
                usdc(30),
                "Dinner",
                Category::FoodDrink,
                vec![
                    split(ALICE, usdc(10)),
                    split(BOB, usdc(10)),
                    split(CHARLIE, usdc(10)),
                ],
            ),
        )
        .unwrap();
    engine
        .add_expense(
            group,
            ALICE,
            expense(
                usdc(20),
                "Taxi",
                Category::Transport,
                vec![split(OWNER, usdc(10)), split(BOB, usdc(10))],
            ),
        )
        .unwrap();

    // {Owner:+20, Alice:+10, Bob:-20, Charlie:-10}.
    let plan = engine.settlement_plan(group).unwrap();
    assert!(plan.len() <= 3);
    let owed: i64 = plan.iter().map(|t| t.amount.units()).sum();
    assert_eq!(owed, usdc(30).units());

    for debtor in [BOB, CHARLIE] {
        engine.rail_mut().approve(debtor, EXECUTOR, usdc(20));
    }
    engine.settle_all(group).unwrap();

    for member in [OWNER, ALICE, BOB, CHARLIE] {
        assert_eq!(engine.balance(group, member), Money::ZERO);
    }
    assert!(engine.is_settled(group).unwrap());
    assert_zero_sum(&engine, group);
}

#[test]
fn split_mismatch_is_rejected_and_nothing_changes() {
    let mut engine = engine();
    let group = engine.create_group(OWNER, &[ALICE, BOB]).unwrap();

    let result = engine.add_expense(
        group,
        OWNER,
        expense(
            usdc(30),
            "Wrong",
            Category::Other,
            vec![split(ALICE, usdc(5)), split(BOB, usdc(5))],
        ),
    );

    assert_eq!(result, Err(LedgerError::SplitMismatch));
    assert_eq!(engine.expense_count(group), 0);
    for member in [OWNER, ALICE, BOB] {
        assert_eq!(engine.balance(group, member), Money::ZERO);
    }
}

#[test]
fn non_creator_cannot_add_members() {
    let mut engine = engine();
    let group = engine.create_group(OWNER, &[ALICE]).unwrap();

    assert_eq!(
        engine.add_member(group, ALICE, BOB),
        Err(LedgerError::Unauthorized)
    );
    assert_eq!(engine.members(group).unwrap(), &[OWNER, ALICE]);

    engine.add_member(group, OWNER, BOB).unwrap();
    assert!(engine.is_member(group, BOB).unwrap());
}

#[test]
fn partial_then_full_settlement() {
    let mut engine = engine();
    let group = engine.create_group(OWNER, &[ALICE, BOB]).unwrap();

    // Owner pays 30 including their own share: +20 / -10 / -10.
    engine
        .add_expense(
            group,
            OWNER,
            expense(
                usdc(30),
                "Dinner",
                Category::FoodDrink,
                vec![
                    split(OWNER, usdc(10)),
                    split(ALICE, usdc(10)),
                    split(BOB, usdc(10)),
                ],
            ),
        )
        .unwrap();

    // Alice pays 5 of her 10 debt.
    engine.rail_mut().approve(ALICE, EXECUTOR, usdc(5));
    engine.settle_with(group, ALICE, OWNER, usdc(5)).unwrap();
    assert_eq!(engine.balance(group, ALICE), usdc(-5));
    assert_eq!(engine.balance(group, OWNER), usdc(15));
    assert_eq!(engine.rail().balance_of(OWNER), usdc(1005));
    assert!(!engine.is_settled(group).unwrap());
    assert_zero_sum(&engine, group);

    // The rest settles in one batch.
    engine.rail_mut().approve(ALICE, EXECUTOR, usdc(5));
    engine.rail_mut().approve(BOB, EXECUTOR, usdc(10));
    engine.settle_all(group).unwrap();
    assert!(engine.is_settled(group).unwrap());
    assert_eq!(engine.rail().balance_of(OWNER), usdc(1020));
}

#[test]
fn settle_all_without_authorization_changes_nothing() {
    let mut engine = engine();
    let group = engine.create_group(OWNER, &[ALICE, BOB]).unwrap();

    engine
        .add_expense(
            group,
            OWNER,
            expense(
                usdc(20),
                "Groceries",
                Category::Shopping,
                vec![split(ALICE, usdc(10)), split(BOB, usdc(10))],
            ),
        )
        .unwrap();

    // Nobody approved the executor on the rail.
    let err = engine.settle_all(group).unwrap_err();
    assert!(matches!(err, LedgerError::TransferFailed(_)));
    assert_eq!(engine.balance(group, OWNER), usdc(20));
    assert_eq!(engine.balance(group, ALICE), usdc(-10));
    assert_eq!(engine.rail().balance_of(OWNER), usdc(1000));
    assert_zero_sum(&engine, group);
}

#[test]
fn notification_stream_reflects_operations() {
    let mut engine = engine();
    let events = engine.subscribe();

    let group = engine.create_group(OWNER, &[ALICE]).unwrap();
    engine.add_member(group, OWNER, BOB).unwrap();
    engine
        .add_expense(
            group,
            OWNER,
            expense(
                usdc(10),
                "Coffee",
                Category::FoodDrink,
                vec![split(ALICE, usdc(10))],
            ),
        )
        .unwrap();
    engine.rail_mut().approve(ALICE, EXECUTOR, usdc(10));
    engine.settle_all(group).unwrap();

    let received = events.drain();
    assert!(matches!(
        &received[0],
        LedgerEvent::GroupCreated { id, creator, members, .. }
            if *id == group && *creator == OWNER && members.len() == 2
    ));
    assert!(matches!(
        &received[1],
        LedgerEvent::MemberAdded { member, .. } if *member == BOB
    ));
    assert!(matches!(
        &received[2],
        LedgerEvent::ExpenseAdded { index: 0, payer, amount, .. }
            if *payer == OWNER && *amount == usdc(10)
    ));
    assert!(matches!(
        &received[3],
        LedgerEvent::Settled { from, to, amount, .. }
            if *from == ALICE && *to == OWNER && *amount == usdc(10)
    ));
    assert!(matches!(
        &received[4],
        LedgerEvent::GroupSettled { transfer_count: 1, .. }
    ));
    assert_eq!(received.len(), 5);
}

#[test]
fn failed_operations_emit_no_events() {
    let mut engine = engine();
    let events = engine.subscribe();
    let group = engine.create_group(OWNER, &[ALICE]).unwrap();

    let _ = engine.add_member(group, ALICE, BOB);
    let _ = engine.add_expense(
        group,
        BOB,
        expense(usdc(1), "Nope", Category::Other, vec![split(ALICE, usdc(1))]),
    );
    let _ = engine.settle_with(group, ALICE, OWNER, usdc(1));

    let received = events.drain();
    assert_eq!(received.len(), 1);
    assert!(matches!(&received[0], LedgerEvent::GroupCreated { .. }));
}

#[test]
fn groups_are_independent() {
    let mut engine = engine();
    let first = engine.create_group(OWNER, &[ALICE]).unwrap();
    let second = engine.create_group(ALICE, &[BOB]).unwrap();
    assert_ne!(first, second);

    engine
        .add_expense(
            first,
            OWNER,
            expense(
                usdc(10),
                "Coffee",
                Category::FoodDrink,
                vec![split(ALICE, usdc(10))],
            ),
        )
        .unwrap();

    assert_eq!(engine.balance(second, ALICE), Money::ZERO);
    assert_eq!(engine.expense_count(second), 0);
    // Bob is in `second` only; paying into `first` is rejected.
    assert_eq!(
        engine.add_expense(
            first,
            BOB,
            expense(usdc(1), "Nope", Category::Other, vec![split(OWNER, usdc(1))]),
        ),
        Err(LedgerError::Unauthorized)
    );
}

#[test]
fn events_serialize_with_exact_money_and_hex_members() {
    let mut engine = engine();
    let events = engine.subscribe();
    engine.create_group(OWNER, &[ALICE]).unwrap();

    let event = events.drain().remove(0);
    let json = serde_json::to_value(&event).unwrap();
    let created = &json["GroupCreated"];
    assert_eq!(created["id"], 0);
    assert_eq!(created["creator"], OWNER.to_string());
}
