use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsxt_parser::{transform, TransformOptions};

// A medium-size dialect source with imports, classes, events and views
const JSX_SOURCE: &str = r#"
import { Application, Window } from 'flare/app';
import * as utils from './utils';
import './theme.jsx';

// A list view with bound rows
export class TodoList extends Window {
    event onSelect, onRemove;

    items = [];
    filter = 'all';
    header = <h1 class="title">Todo</h1>;

    get visible() {
        return this.items.filter(item => this.filter == 'all' || item.state == this.filter);
    }

    select(index) {
        this.triggerSelect({ index, item: this.items[index] });
    }

    render() {
        return (
            <div class="todo" style=%{this.theme.panel}>
                ${this.header}
                <ul>
                    ${this.visible.map((item, i) =>
                        <li key=i onClick=() => this.select(i)>
                            <span class=%%{item.done ? 'done' : ''}>${item.text}</span>
                            <!-- remove button -->
                            <vx:Button label="remove" onClick=() => this.remove(i)/>
                        </li>
                    )}
                </ul>
                <p>@@  ${this.items.length}  items left@@</p>
            </div>
        );
    }

    remove(index) {
        const [item] = this.items.splice(index, 1);
        this.triggerRemove(item);
        return /^\s*$/.test(item.text);
    }
}

export default function main(argv) {
    const app = new Application();
    app.start(<TodoList />);
    return `started ${argv.length} ${utils.version}`;
}
"#;

fn bench_transform_jsx(c: &mut Criterion) {
    let options = TransformOptions::default();
    c.bench_function("transform_jsx_medium", |b| {
        b.iter(|| {
            let output = transform(black_box(JSX_SOURCE), "bench.jsx", &options);
            black_box(output)
        });
    });
}

fn bench_transform_plain(c: &mut Criterion) {
    let options = TransformOptions {
        jsx: false,
        remove_comments: true,
    };
    let source = JSX_SOURCE.replace('<', " < ");
    c.bench_function("transform_plain_medium", |b| {
        b.iter(|| {
            let output = transform(black_box(&source), "bench.js", &options);
            black_box(output)
        });
    });
}

criterion_group!(benches, bench_transform_jsx, bench_transform_plain);
criterion_main!(benches);
