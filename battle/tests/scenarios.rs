//! Whole-match scenarios run through `analyze`

use replaydex_battle::{AnalysisError, Combatant, DamageCause, MatchReport, Player, analyze};

const HEADER: &str = "\
|j|☆Alice
|j|☆Bob
|gametype|singles
|player|p1|Alice|60|1500
|player|p2|Bob|113|1480
|teamsize|p1|3
|teamsize|p2|3
|gen|9
|tier|[Gen 9] OU
|poke|p1|Garchomp, L50, F|
|poke|p1|Weavile, L50, M|
|poke|p1|Corviknight, L50|
|poke|p2|Toxapex, L50|
|poke|p2|Dragapult, L50|
|poke|p2|Garchomp, L50, M|
|teampreview
|start
|switch|p1a: Chompy|Garchomp, L50, F|100/100
|switch|p2a: Pex|Toxapex, L50|100/100
|turn|1";

fn log(body: &str) -> String {
    format!("{HEADER}\n{body}")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn stats<'a>(
    report: &'a MatchReport,
    player: Player,
    species: &str,
) -> &'a replaydex_battle::CombatantStats {
    report
        .combatant(player, species)
        .unwrap_or_else(|| panic!("no record for {player}: {species}"))
}

/// Garchomp sets rocks, Weavile comes in, Dragapult takes rocks then a hit
const SCENARIO_A: &str = "\
|move|p1a: Chompy|Stealth Rock|p2a: Pex
|-sidestart|p2: Bob|move: Stealth Rock
|move|p2a: Pex|Recover|p2a: Pex
|-fail|p2a: Pex|move: Recover
|
|upkeep
|turn|2
|switch|p1a: Weavile|Weavile, L50, M|100/100
|switch|p2a: Dragapult|Dragapult, L50|100/100
|-damage|p2a: Dragapult|88/100|[from] Stealth Rock
|
|upkeep
|turn|3
|move|p1a: Weavile|Triple Axel|p2a: Dragapult
|-damage|p2a: Dragapult|36/100
|-hitcount|p2a: Dragapult|3
|
|upkeep
|turn|4";

#[test]
fn test_scenario_a_hazard_then_direct_hit() {
    let report = analyze(&log(SCENARIO_A)).unwrap();

    let weavile = stats(&report, Player::P1, "Weavile");
    assert!(approx(weavile.damage_dealt.direct(), 52.0));
    assert!(approx(weavile.damage_dealt.indirect(), 0.0));

    let chomp = stats(&report, Player::P1, "Garchomp");
    assert!(approx(chomp.damage_dealt.get(DamageCause::StealthRock), 12.0));
    assert!(approx(chomp.damage_dealt.indirect(), 12.0));
    assert!(approx(chomp.damage_dealt.direct(), 0.0));

    let pult = stats(&report, Player::P2, "Dragapult");
    assert!(approx(pult.damage_taken.total(), 64.0));
    assert!(approx(pult.damage_taken.direct(), 52.0));
    assert!(approx(pult.damage_taken.indirect(), 12.0));
}

/// Weavile knocks Garchomp with Rough Skin, then takes Life Orb recoil
const SCENARIO_B: &str = "\
|switch|p2a: Sharky|Garchomp, L50, M|100/100
|move|p1a: Chompy|Swords Dance|p1a: Chompy
|-boost|p1a: Chompy|atk|2
|
|upkeep
|turn|2
|switch|p1a: Weavile|Weavile, L50, M|100/100
|move|p2a: Sharky|Swords Dance|p2a: Sharky
|-boost|p2a: Sharky|atk|2
|
|upkeep
|turn|3
|move|p1a: Weavile|Knock Off|p2a: Sharky
|-damage|p2a: Sharky|60/100
|-damage|p1a: Weavile|88/100|[from] ability: Rough Skin|[of] p2a: Sharky
|-damage|p1a: Weavile|78/100|[from] item: Life Orb
|
|upkeep
|turn|4";

#[test]
fn test_scenario_b_contact_retaliation() {
    let report = analyze(&log(SCENARIO_B)).unwrap();

    let weavile = stats(&report, Player::P1, "Weavile");
    assert!(approx(weavile.damage_taken.get(DamageCause::ContactAbility), 12.0));
    assert!(approx(weavile.damage_taken.get(DamageCause::PassiveItem), 10.0));
    assert!(approx(weavile.damage_taken.indirect(), 22.0));
    assert!(approx(weavile.damage_taken.direct(), 0.0));
    assert!(approx(weavile.damage_dealt.direct(), 40.0));

    let sharky = stats(&report, Player::P2, "Garchomp");
    assert!(approx(sharky.damage_taken.direct(), 40.0));
    assert!(approx(sharky.damage_dealt.get(DamageCause::ContactAbility), 12.0));
    // Life Orb is nobody's damage but Weavile's own
    assert!(approx(sharky.damage_dealt.total(), 12.0));
}

/// Toxapex, worn down earlier, faints to rocks on a turn nobody moved
const SCENARIO_C: &str = "\
|move|p1a: Chompy|Stealth Rock|p2a: Pex
|-sidestart|p2: Bob|move: Stealth Rock
|
|upkeep
|turn|2
|switch|p1a: Weavile|Weavile, L50, M|100/100
|move|p2a: Pex|Haze|p2a: Pex
|-clearallboost
|
|upkeep
|turn|3
|move|p1a: Weavile|Knock Off|p2a: Pex
|-damage|p2a: Pex|10/100
|
|upkeep
|turn|4
|switch|p2a: Dragapult|Dragapult, L50|100/100
|-damage|p2a: Dragapult|88/100|[from] Stealth Rock
|move|p1a: Weavile|Triple Axel|p2a: Dragapult
|-damage|p2a: Dragapult|36/100
|
|upkeep
|turn|5
|switch|p2a: Pex|Toxapex, L50|10/100
|-damage|p2a: Pex|0 fnt|[from] Stealth Rock
|faint|p2a: Pex
|
|upkeep
|turn|6";

#[test]
fn test_scenario_c_hazard_knockout_goes_to_setter() {
    let report = analyze(&log(SCENARIO_C)).unwrap();

    assert_eq!(report.knockouts.len(), 1);
    let ko = &report.knockouts[0];
    assert_eq!(ko.attacker, Combatant::new(Player::P1, "Garchomp"));
    assert_eq!(ko.victim, Combatant::new(Player::P2, "Toxapex"));
    assert_eq!(ko.cause, DamageCause::StealthRock);
    assert_eq!(ko.credited.as_deref(), Some("Stealth Rock"));
    assert_eq!(ko.turn, 5);

    assert_eq!(stats(&report, Player::P1, "Garchomp").knockouts, 1);
    assert_eq!(stats(&report, Player::P1, "Weavile").knockouts, 0);
}

const FULL_MATCH: &str = "\
|move|p1a: Chompy|Stealth Rock|p2a: Pex
|-sidestart|p2: Bob|move: Stealth Rock
|move|p2a: Pex|Toxic|p1a: Chompy
|-status|p1a: Chompy|tox
|
|-damage|p1a: Chompy|94/100 tox|[from] psn
|upkeep
|turn|2
|c|☆Alice|gl
|switch|p1a: Weavile|Weavile, L50, M|100/100
|move|p2a: Pex|Scald|p1a: Weavile
|-damage|p1a: Weavile|41/100
|-status|p1a: Weavile|brn
|
|-damage|p1a: Weavile|35/100 brn|[from] brn
|upkeep
|turn|3
|move|p1a: Weavile|Knock Off|p2a: Pex
|-damage|p2a: Pex|58/100
|-enditem|p2a: Pex|Black Sludge|[from] move: Knock Off|[of] p1a: Weavile
|move|p2a: Pex|Scald|p1a: Weavile
|-damage|p1a: Weavile|0 fnt
|faint|p1a: Weavile
|
|upkeep
|c|☆Bob|oops
|switch|p1a: Corv|Corviknight, L50|100/100
|turn|4
|switch|p2a: Dragapult|Dragapult, L50|100/100
|-damage|p2a: Dragapult|88/100|[from] Stealth Rock
|move|p1a: Corv|Brave Bird|p2a: Dragapult
|-damage|p2a: Dragapult|30/100
|-damage|p1a: Corv|81/100|[from] Recoil
|
|upkeep
|turn|5
|move|p2a: Dragapult|Draco Meteor|p1a: Corv
|-damage|p1a: Corv|45/100
|-unboost|p2a: Dragapult|spa|2
|move|p1a: Corv|Brave Bird|p2a: Dragapult
|-damage|p2a: Dragapult|0 fnt
|faint|p2a: Dragapult
|-damage|p1a: Corv|35/100|[from] Recoil
|
|upkeep
|switch|p2a: Pex|Toxapex, L50|58/100
|-damage|p2a: Pex|46/100|[from] Stealth Rock
|turn|6
|-message|Bob forfeited.
|
|win|Alice";

/// Second roster: Tyranitar leads for p1, Zoroark hides on p2
const SAND_HEADER: &str = "\
|player|p1|Alice|60|1500
|player|p2|Bob|113|1480
|teamsize|p1|2
|teamsize|p2|3
|gen|9
|tier|[Gen 9] OU
|poke|p1|Tyranitar, L50, M|
|poke|p1|Garchomp, L50, F|
|poke|p2|Toxapex, L50|
|poke|p2|Dragapult, L50|
|poke|p2|Zoroark, L50, M|
|start
|switch|p1a: Ttar|Tyranitar, L50, M|100/100
|switch|p2a: Pex|Toxapex, L50|100/100
|turn|1";

fn sand_log(body: &str) -> String {
    format!("{SAND_HEADER}\n{body}")
}

/// Garchomp sings, both sides sit through the count
const PERISH_SONG: &str = "\
|move|p1a: Chompy|Perish Song|p1a: Chompy
|-fieldactivate|move: Perish Song
|-start|p1a: Chompy|perish3|[silent]
|-start|p2a: Pex|perish3|[silent]
|
|upkeep
|turn|2
|move|p2a: Pex|Recover|p2a: Pex
|-fail|p2a: Pex|move: Recover
|
|-start|p1a: Chompy|perish2
|-start|p2a: Pex|perish2
|upkeep
|turn|3
|
|-start|p1a: Chompy|perish1
|-start|p2a: Pex|perish1
|upkeep
|turn|4
|
|-start|p1a: Chompy|perish0
|-start|p2a: Pex|perish0
|upkeep
|faint|p1a: Chompy
|faint|p2a: Pex";

#[test]
fn test_perish_song_credits_the_singer() {
    let report = analyze(&log(PERISH_SONG)).unwrap();

    let chomp = Combatant::new(Player::P1, "Garchomp");
    let pex = Combatant::new(Player::P2, "Toxapex");

    assert_eq!(report.knockouts.len(), 2);
    let own = &report.knockouts[0];
    assert!(own.is_self_ko());
    assert_eq!(own.victim, chomp);
    assert_eq!(own.cause, DamageCause::DelayedMove);

    let sung = &report.knockouts[1];
    assert_eq!(sung.attacker, chomp);
    assert_eq!(sung.victim, pex);
    assert_eq!(sung.cause, DamageCause::DelayedMove);
    assert_eq!(sung.credited.as_deref(), Some("Perish Song"));
    assert_eq!(sung.turn, 4);

    // The self-KO is listed but never counted
    assert_eq!(stats(&report, Player::P1, "Garchomp").knockouts, 1);
    assert!(report.uncredited_faints.is_empty());

    let pex_stats = stats(&report, Player::P2, "Toxapex");
    assert!(approx(pex_stats.damage_taken.get(DamageCause::DelayedMove), 100.0));
    assert!(approx(
        stats(&report, Player::P1, "Garchomp")
            .damage_dealt
            .get(DamageCause::DelayedMove),
        100.0
    ));
}

/// Tyranitar's sand finishes Toxapex after Tyranitar has left the field
const SAND_KO: &str = "\
|-weather|Sandstorm|[from] ability: Sand Stream|[of] p1a: Ttar
|move|p1a: Ttar|Crunch|p2a: Pex
|-damage|p2a: Pex|10/100
|move|p2a: Pex|Haze|p2a: Pex
|-clearallboost
|
|-weather|Sandstorm|[upkeep]
|-damage|p2a: Pex|4/100|[from] Sandstorm
|upkeep
|turn|2
|switch|p1a: Chompy|Garchomp, L50, F|100/100
|move|p2a: Pex|Haze|p2a: Pex
|-clearallboost
|
|-weather|Sandstorm|[upkeep]
|-damage|p2a: Pex|0 fnt|[from] Sandstorm
|faint|p2a: Pex
|upkeep";

#[test]
fn test_weather_knockout_goes_to_setter() {
    let report = analyze(&sand_log(SAND_KO)).unwrap();

    assert_eq!(report.knockouts.len(), 1);
    let ko = &report.knockouts[0];
    assert_eq!(ko.attacker, Combatant::new(Player::P1, "Tyranitar"));
    assert_eq!(ko.victim, Combatant::new(Player::P2, "Toxapex"));
    assert_eq!(ko.cause, DamageCause::Sandstorm);
    assert_eq!(ko.credited.as_deref(), Some("Sandstorm"));
    assert_eq!(ko.turn, 2);

    let ttar = stats(&report, Player::P1, "Tyranitar");
    assert_eq!(ttar.knockouts, 1);
    assert!(approx(ttar.damage_dealt.direct(), 90.0));
    assert!(approx(ttar.damage_dealt.get(DamageCause::Sandstorm), 10.0));
    assert_eq!(stats(&report, Player::P1, "Garchomp").knockouts, 0);
}

/// Zoroark comes in as Dragapult and is revealed by the first hit
const ILLUSION: &str = "\
|switch|p2a: Dragapult|Dragapult, L50|100/100
|move|p1a: Ttar|Stone Edge|p2a: Dragapult
|-damage|p2a: Dragapult|70/100
|replace|p2a: Zoroark|Zoroark, L50, M|70/100
|-end|p2a: Zoroark|Illusion
|
|upkeep
|turn|2
|move|p1a: Ttar|Stone Edge|p2a: Zoroark
|-damage|p2a: Zoroark|30/100
|
|upkeep
|turn|3";

#[test]
fn test_illusion_reveal_keeps_hp() {
    let report = analyze(&sand_log(ILLUSION)).unwrap();

    let zoroark = stats(&report, Player::P2, "Zoroark");
    assert!(zoroark.appeared);
    assert!(approx(zoroark.damage_taken.direct(), 40.0));
    assert!(approx(zoroark.healing.total, 0.0));

    // Damage taken under the disguise stays on the species shown
    let pult = stats(&report, Player::P2, "Dragapult");
    assert!(approx(pult.damage_taken.direct(), 30.0));

    let ttar = stats(&report, Player::P1, "Tyranitar");
    assert!(approx(ttar.damage_dealt.direct(), 70.0));
}

#[test]
fn test_direct_plus_indirect_is_total() {
    for body in [SCENARIO_A, SCENARIO_B, SCENARIO_C, FULL_MATCH] {
        let report = analyze(&log(body)).unwrap();
        for record in &report.combatants {
            for ledger in [&record.damage_dealt, &record.damage_taken] {
                assert!(
                    approx(ledger.direct() + ledger.indirect(), ledger.total()),
                    "ledger mismatch for {}",
                    record.combatant
                );
            }
        }
    }
}

#[test]
fn test_knockouts_never_exceed_faints() {
    for body in [SCENARIO_A, SCENARIO_B, SCENARIO_C, FULL_MATCH, PERISH_SONG] {
        let report = analyze(&log(body)).unwrap();
        assert!(report.total_knockouts() <= report.total_faints());
    }
}

#[test]
fn test_full_match() {
    let report = analyze(&log(FULL_MATCH)).unwrap();

    assert_eq!(report.turns, 6);
    assert_eq!(report.knockouts.len(), 2);
    assert_eq!(report.total_faints(), 2);

    let pex = stats(&report, Player::P2, "Toxapex");
    assert_eq!(pex.knockouts, 1);
    assert!(approx(pex.damage_dealt.get(DamageCause::Toxic), 6.0));
    assert!(approx(pex.damage_dealt.get(DamageCause::Burn), 6.0));
    assert!(approx(pex.damage_dealt.direct(), 59.0 + 35.0));

    let corv = stats(&report, Player::P1, "Corviknight");
    assert_eq!(corv.knockouts, 1);
    assert!(approx(corv.damage_taken.get(DamageCause::Recoil), 29.0));
    assert!(approx(corv.damage_taken.self_inflicted(), 29.0));

    let chomp = stats(&report, Player::P1, "Garchomp");
    assert!(approx(chomp.damage_dealt.get(DamageCause::StealthRock), 24.0));
    assert!(chomp.won);
    assert!(!pex.won);
}

#[test]
fn test_analysis_is_idempotent() {
    let text = log(FULL_MATCH);
    assert_eq!(analyze(&text).unwrap(), analyze(&text).unwrap());
}

#[test]
fn test_interstitial_lines_do_not_matter() {
    let noisy: String = log(FULL_MATCH)
        .lines()
        .flat_map(|line| [line, "|c|☆Spectator|hi | there", "|t:|1700000000", "", "|l|Lurker"])
        .collect::<Vec<_>>()
        .join("\n");

    assert_eq!(analyze(&noisy).unwrap(), analyze(&log(FULL_MATCH)).unwrap());
}

#[test]
fn test_missing_player_declaration_fails() {
    let text = log(SCENARIO_A).replace("|player|p2|Bob|113|1480\n", "");
    assert_eq!(analyze(&text), Err(AnalysisError::MissingPlayer(Player::P2)));
}

#[test]
fn test_empty_log_fails() {
    assert_eq!(analyze(""), Err(AnalysisError::EmptyLog));
    assert_eq!(analyze("\n\n"), Err(AnalysisError::EmptyLog));
}

#[cfg(feature = "serde")]
#[test]
fn test_report_serializes() {
    let report = analyze(&log(SCENARIO_C)).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["knockouts"][0]["cause"], "stealth_rock");
    assert_eq!(json["knockouts"][0]["attacker"]["species"], "Garchomp");
    assert_eq!(json["uncredited_faints"], serde_json::json!([]));

    let back: MatchReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
