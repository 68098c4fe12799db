use anyhow::{Context, Result};
use serde_json::{json, Value};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Skill score on a 0–10 scale, one decimal.
fn skill(rng: &mut SimpleRng, mean: f64) -> f64 {
    (rng.gauss(mean, 1.5).clamp(0.0, 10.0) * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let first_names = ["Ali", "Bo", "Cy", "Dana", "Eli", "Fay", "Gus", "Hana", "Ivo", "Jun"];
    let last_names = ["Jones", "Chen", "Diaz", "Evans", "Khan", "Lopez", "Moreau", "Novak"];
    let classes = ["A", "B", "C"];
    let personas = ["Visual learner", "Auditory learner", "Hands-on learner", "Independent reader"];
    let class_bias = [1.0, 0.0, -0.8];

    let students: Vec<Value> = (1..=60u64)
        .map(|id| {
            let class_idx = (id as usize - 1) % classes.len();
            let base = 6.0 + class_bias[class_idx];
            let comprehension = skill(&mut rng, base);
            let attention = skill(&mut rng, base - 0.5);
            let focus = skill(&mut rng, base - 0.3);
            let retention = skill(&mut rng, base);
            let engagement_time = (rng.gauss(45.0, 12.0).max(5.0) * 10.0).round() / 10.0;

            // Score is driven mostly by comprehension and retention.
            let score = 20.0 + 4.0 * comprehension + 2.5 * retention + 1.0 * attention
                + rng.gauss(0.0, 4.0);
            let score = (score.clamp(0.0, 100.0) * 10.0).round() / 10.0;

            let name = format!("{} {}", rng.pick(&first_names), rng.pick(&last_names));
            json!({
                "student_id": id,
                "name": name,
                "class": classes[class_idx],
                "assessment_score": score,
                "comprehension": comprehension,
                "attention": attention,
                "focus": focus,
                "retention": retention,
                "engagement_time": engagement_time,
                "persona": rng.pick(&personas),
            })
        })
        .collect();

    let output_path = "students_with_personas.json";
    let text = serde_json::to_string_pretty(&students).context("serialising students")?;
    std::fs::write(output_path, text).with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {} students to {output_path}", students.len());
    Ok(())
}
