//! Static strength (ОФП) and running drill (СБУ) catalogues.

/// How an exercise moves, drives the little animated marker next to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Jump,
    Run,
    Slow,
}

impl Motion {
    /// Vertical offset of the marker at `time` seconds, in points.
    pub fn offset(&self, time: f64) -> f32 {
        let (speed, height) = match self {
            Motion::Jump => (6.0, 8.0),
            Motion::Run => (10.0, 3.0),
            Motion::Slow => (2.0, 4.0),
        };
        ((time * speed).sin().abs() * height) as f32
    }
}

#[derive(Clone, Debug)]
pub struct Exercise {
    pub name: &'static str,
    pub sets: &'static str,
    pub description: &'static str,
    pub motion: Motion,
}

#[derive(Clone, Debug)]
pub struct Drill {
    pub name: &'static str,
    pub description: &'static str,
    pub motion: Motion,
}

pub const DRILL_ADVICE: &str = "Совет: Выполняйте СБУ перед основной скоростной работой или после легкого кросса, 2-3 раза в неделю. Дистанция каждого упражнения 30-50 метров.";

pub fn strength_exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            name: "Планка",
            sets: "3 x 45 сек",
            description: "Укрепление кора. Спина ровная, таз не проваливаем.",
            motion: Motion::Slow,
        },
        Exercise {
            name: "Боковая планка",
            sets: "3 x 30 сек",
            description: "Косые мышцы. Держим линию тела.",
            motion: Motion::Slow,
        },
        Exercise {
            name: "Приседания",
            sets: "3 x 20",
            description: "Базовая сила ног. Колени не выходят за носки.",
            motion: Motion::Slow,
        },
        Exercise {
            name: "Выпады назад",
            sets: "3 x 15",
            description: "Акцент на ягодицы. Корпус держим ровно.",
            motion: Motion::Slow,
        },
        Exercise {
            name: "Подъемы на носки",
            sets: "3 x 20",
            description: "Укрепление икр и ахилла. Делать плавно.",
            motion: Motion::Slow,
        },
        Exercise {
            name: "Берпи",
            sets: "3 x 12",
            description: "Общая выносливость и взрывная сила.",
            motion: Motion::Jump,
        },
        Exercise {
            name: "Ягодичный мостик",
            sets: "3 x 20",
            description: "Задняя поверхность бедра.",
            motion: Motion::Slow,
        },
        Exercise {
            name: "Отжимания",
            sets: "3 x 15",
            description: "Плечевой пояс и грудь.",
            motion: Motion::Slow,
        },
    ]
}

pub fn running_drills() -> Vec<Drill> {
    vec![
        Drill {
            name: "Бег с высоким бедром",
            description: "Корпус прямой, высокая частота, акцент на подъем.",
            motion: Motion::Jump,
        },
        Drill {
            name: "Захлест голени",
            description: "Пятки касаются ягодиц, колени смотрят строго вниз.",
            motion: Motion::Run,
        },
        Drill {
            name: "Многоскоки (Олений бег)",
            description: "Мощное отталкивание и фаза полета. Тянемся вперед.",
            motion: Motion::Jump,
        },
        Drill {
            name: "Семенящий бег",
            description: "Мелкие шаги с расслабленной стопой и высокой частотой.",
            motion: Motion::Run,
        },
        Drill {
            name: "Выпады в движении",
            description: "Широкий шаг, колено сзади почти касается земли.",
            motion: Motion::Slow,
        },
        Drill {
            name: "Бег на прямых ногах",
            description: "Приземление на переднюю часть стопы, ноги 'ножницы'.",
            motion: Motion::Run,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_sizes() {
        assert_eq!(strength_exercises().len(), 8);
        assert_eq!(running_drills().len(), 6);
    }

    #[test]
    fn test_motion_offset_bounds() {
        for motion in [Motion::Jump, Motion::Run, Motion::Slow] {
            for step in 0..100 {
                let offset = motion.offset(step as f64 * 0.05);
                assert!((0.0..=8.0).contains(&offset));
            }
        }
        assert_eq!(Motion::Run.offset(0.0), 0.0);
    }
}
