/*
campaign_flow.rs

Copyright 2025 Hervé Quatremain

This file is part of HexPath.

HexPath is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

HexPath is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
HexPath. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Play the built-in levels through the public API, and persist the state between runs.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use hexpath::campaign::{Campaign, SessionSnapshot};
use hexpath::game::{Move, Outcome};
use hexpath::grid::Coordinate;
use hexpath::history::History;
use hexpath::level::catalogue;
use hexpath::saver::history::SaverHistory;
use hexpath::saver::session::SaverSession;
use hexpath::solver::{self, Solution};

/// Play the cheapest route of the current level.
fn play_cheapest_route(campaign: &mut Campaign) -> Move {
    let board = campaign.game().board();
    let solution: Solution = solver::solve(board.matrix(), board.start(), board.end()).unwrap();
    let mut last: Move = Move::Unchanged;
    for coord in solution.route.into_iter().skip(1) {
        last = campaign.click(coord).unwrap();
    }
    last
}

#[test]
fn catalogue_budgets_and_cheapest_routes() {
    let expected: [(u32, u32); 4] = [(10, 8), (10, 8), (15, 8), (20, 7)];
    for (level, (budget, cheapest)) in catalogue::catalogue().into_iter().zip(expected) {
        let board = level.prepare().unwrap();
        assert_eq!(board.initial_budget(), budget);
        assert_eq!(board.min_cost(), Some(cheapest));
    }
}

#[test]
fn whole_catalogue_then_random_levels() {
    let mut rng: StdRng = StdRng::seed_from_u64(2024);
    let mut campaign: Campaign = Campaign::with_catalogue(History::new()).unwrap();
    let mut expected_score: u64 = 0;

    for index in 0..4 {
        assert_eq!(campaign.index(), Some(index));
        let margin: u32 = campaign.game().initial_budget()
            - campaign.game().board().min_cost().unwrap();
        match play_cheapest_route(&mut campaign) {
            Move::Won(entry) => assert_eq!(entry.margin(), margin),
            other => panic!("level {index} not won: {other:?}"),
        }
        expected_score += u64::from(margin);
        campaign.next_level(&mut rng).unwrap();
    }

    assert_eq!(campaign.index(), None);
    assert_eq!(campaign.history().len(), 4);
    assert_eq!(campaign.history().total_score(), expected_score);

    // Random levels always leave the buffer as margin on the cheapest route
    assert!(matches!(
        play_cheapest_route(&mut campaign),
        Move::Won(ref e) if e.margin() == 2
    ));
}

#[test]
fn quit_and_resume() {
    let dir: TempDir = TempDir::new().unwrap();
    let saver_session: SaverSession = SaverSession::new(dir.path().to_path_buf());
    let saver_history: SaverHistory = SaverHistory::new(dir.path().to_path_buf());

    // First run: win level 1, then take two steps in level 2
    let mut rng: StdRng = StdRng::seed_from_u64(1);
    let mut campaign: Campaign = Campaign::with_catalogue(History::new()).unwrap();
    play_cheapest_route(&mut campaign);
    campaign.next_level(&mut rng).unwrap();
    campaign.click(Coordinate::new(3, 0)).unwrap();
    campaign.click(Coordinate::new(2, 0)).unwrap();
    saver_session.save(&campaign.snapshot()).unwrap();
    saver_history.save(campaign.history()).unwrap();

    // Second run
    let history: History = saver_history.load().unwrap().unwrap();
    let snapshot: SessionSnapshot = saver_session.load().unwrap().unwrap();
    let mut resumed: Campaign =
        Campaign::from_snapshot(catalogue::catalogue(), snapshot, history).unwrap();
    assert_eq!(resumed.index(), Some(1));
    assert_eq!(resumed.history().len(), 1);
    assert_eq!(
        resumed.game().path(),
        &[
            Coordinate::new(4, 0),
            Coordinate::new(3, 0),
            Coordinate::new(2, 0)
        ]
    );
    assert_eq!(resumed.game().budget(), 10 - 1 - 2);
    assert_eq!(resumed.game().outcome(), Outcome::InProgress);

    // Backtracking still works on the restored path
    assert_eq!(
        resumed.click(Coordinate::new(3, 0)),
        Ok(Move::Backtracked { removed: 2 })
    );
    assert_eq!(resumed.game().budget(), 10);

    resumed.start_over().unwrap();
    saver_history.save(resumed.history()).unwrap();
    assert!(saver_history.load().unwrap().unwrap().is_empty());
    assert_eq!(resumed.index(), Some(0));
}
