use crate::api::models::ChampionKillEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageSource {
    pub participant_id: i32,
    pub name: String,
    pub physical_damage: i64,
    pub magic_damage: i64,
    pub true_damage: i64,
}

impl DamageSource {
    pub fn total(&self) -> i64 {
        self.physical_damage + self.magic_damage + self.true_damage
    }
}

/// Damage the victim took before dying, one row per source.
pub fn death_recap(kill: &ChampionKillEvent) -> Vec<DamageSource> {
    let mut sources: Vec<DamageSource> = Vec::new();

    for hit in &kill.victimdamagereceived_set {
        let existing = sources
            .iter_mut()
            .find(|s| s.participant_id == hit.participant_id && s.name == hit.name);

        match existing {
            Some(source) => {
                source.physical_damage += hit.physical_damage;
                source.magic_damage += hit.magic_damage;
                source.true_damage += hit.true_damage;
            }
            None => sources.push(DamageSource {
                participant_id: hit.participant_id,
                name: hit.name.clone(),
                physical_damage: hit.physical_damage,
                magic_damage: hit.magic_damage,
                true_damage: hit.true_damage,
            }),
        }
    }

    sources.sort_by(|a, b| b.total().cmp(&a.total()));
    sources
}
