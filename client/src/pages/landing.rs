//! Landing page: what Differential Evolution does and why CloudLab exists.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <h1>"CloudLab"</h1>
            <p class="landing-page__tagline">"Optimize your experiments with Differential Evolution."</p>

            <section>
                <h2>"How does Differential Evolution work?"</h2>
                <p>
                    "DE is an optimization algorithm that solves complex problems by iterating over "
                    "generations. It evolves a population of candidate solutions through mutation and "
                    "crossover, keeping what performs better. Each generation moves closer to the best "
                    "configuration for your experimental setup."
                </p>
            </section>

            <section>
                <h2>"Why CloudLab?"</h2>
                <p>
                    "CloudLab takes the setup work out of running optimization experiments. Describe "
                    "your variables once, score each generation as results come in, and let the "
                    "optimizer propose the next set of trials. Researchers in biology, chemistry, or "
                    "any other field reach good configurations in fewer trials."
                </p>
            </section>

            <div class="landing-page__actions">
                <A href="/experiments/new" attr:class="btn btn--primary">"Create an experiment"</A>
                <A href="/experiments" attr:class="btn">"View my experiments"</A>
            </div>

            <p class="landing-page__closing">
                "Start optimizing your experiments with CloudLab and let data drive your discoveries."
            </p>
        </div>
    }
}
