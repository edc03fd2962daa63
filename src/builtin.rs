//! Reference questionnaire shipped with the crate.
//!
//! `clarity` v1 measures three relational patterns on a five-point frequency
//! scale:
//!
//! | Axis | Pattern | Questions | Reversed |
//! |------|---------|-----------|----------|
//! | `nevoa` | fog / confusion | n1–n4 | none |
//! | `medo` | fear | m1–m4 | none |
//! | `limites` | boundary violation | l1–l4 | l4 |
//!
//! Axis totals run `0..=16` and fall into `baixo` (0–5), `moderado` (6–10) or
//! `alto` (11–16). The global total runs `0..=48` and falls into `atencao`
//! (0–15), `alerta` (16–31) or `critico` (32–48).
//!
//! Hosts with their own definitions build a [`TestCatalog`] from them
//! directly; this module is one such definition, not a default.
//!
//! [`TestCatalog`]: crate::catalog::TestCatalog

use alloc::vec;

use crate::definition::TestDefinition;
use crate::question::{Axis, Question, Scale};
use crate::zone::{ZoneBand, ZoneConfig, ZoneTable};

/// Test id of the reference questionnaire.
pub const CLARITY_TEST_ID: &str = "clarity";

fn axis_bands() -> ZoneTable {
    ZoneTable::new(vec![
        ZoneBand::new("baixo", 0, 5)
            .with_label("Baixo")
            .with_description("Poucos sinais deste padrão nas respostas."),
        ZoneBand::new("moderado", 6, 10)
            .with_label("Moderado")
            .with_description("O padrão aparece com alguma regularidade e merece atenção."),
        ZoneBand::new("alto", 11, 16)
            .with_label("Alto")
            .with_description("O padrão aparece com frequência; considere buscar apoio."),
    ])
}

/// `clarity` version 1: 3 axes × 4 questions on a `0..=4` scale.
pub fn clarity_v1() -> TestDefinition {
    TestDefinition {
        id: CLARITY_TEST_ID.into(),
        version: 1,
        name: "Teste de Clareza".into(),
        description: "Mapeia sinais de confusão, medo e violação de limites na relação.".into(),
        axes: vec![
            Axis::new("nevoa", "Névoa")
                .with_description("Confusão sobre a própria percepção e memória."),
            Axis::new("medo", "Medo")
                .with_description("Medo da reação do outro e autocensura."),
            Axis::new("limites", "Limites")
                .with_description("Desrespeito aos seus limites e à sua autonomia."),
        ],
        questions: vec![
            Question::new("n1", "Duvido da minha memória sobre o que aconteceu numa discussão.", "nevoa"),
            Question::new("n2", "Saio das conversas sem entender por que me sinto culpada(o).", "nevoa"),
            Question::new("n3", "Ouço que estou exagerando quando falo do que sinto.", "nevoa"),
            Question::new("n4", "Tenho dificuldade em confiar no meu próprio julgamento.", "nevoa"),
            Question::new("m1", "Penso muito antes de falar para evitar uma reação ruim.", "medo"),
            Question::new("m2", "Sinto tensão no corpo quando a outra pessoa chega.", "medo"),
            Question::new("m3", "Escondo coisas pequenas para evitar conflito.", "medo"),
            Question::new("m4", "Tenho medo do que pode acontecer se eu discordar.", "medo"),
            Question::new("l1", "Meu celular ou mensagens são verificados sem minha permissão.", "limites"),
            Question::new("l2", "Sou pressionada(o) a me afastar de amigos ou família.", "limites"),
            Question::new("l3", "Meu \"não\" é ignorado ou tratado como provocação.", "limites"),
            Question::new("l4", "Consigo dizer não sem medo das consequências.", "limites").reversed(),
        ],
        scale: Scale::new(0, 4).with_labels([
            "Nunca",
            "Raramente",
            "Às vezes",
            "Frequentemente",
            "Quase sempre",
        ]),
        randomize_presentation: true,
        zones: ZoneConfig::new(ZoneTable::new(vec![
            ZoneBand::new("atencao", 0, 15)
                .with_label("Atenção")
                .with_description("Poucos sinais de risco no conjunto das respostas."),
            ZoneBand::new("alerta", 16, 31)
                .with_label("Alerta")
                .with_description("Vários sinais de risco; vale conversar com alguém de confiança."),
            ZoneBand::new("critico", 32, 48)
                .with_label("Crítico")
                .with_description("Muitos sinais de risco; procure apoio especializado."),
        ]))
        .axis("nevoa", axis_bands())
        .axis("medo", axis_bands())
        .axis("limites", axis_bands()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_of_reference_test() {
        let def = clarity_v1();
        assert_eq!(def.id, CLARITY_TEST_ID);
        assert_eq!(def.version, 1);
        assert_eq!(def.questions.len(), 12);
        for axis in &def.axes {
            assert_eq!(def.questions_on_axis(&axis.id).count(), 4, "axis {}", axis.id);
        }
        assert_eq!((def.scale.min, def.scale.max), (0, 4));
        assert!(def.randomize_presentation);
    }

    #[test]
    fn test_exactly_one_reversed_question_on_limites() {
        let def = clarity_v1();
        let reversed: alloc::vec::Vec<_> = def.questions.iter().filter(|q| q.reversed).collect();
        assert_eq!(reversed.len(), 1);
        assert_eq!(reversed[0].axis, "limites");
    }
}
